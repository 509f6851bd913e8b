use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::Config;
use crate::model::{Event, Judge, Score, Team};
use crate::scoring::{latest_submissions, validate_event, validate_score, ScoreInput};

/// Everything the directory and score APIs hand over for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub event: Event,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub judges: Vec<Judge>,
    #[serde(default)]
    pub scores: Vec<ScoreInput>,
}

/// A validated snapshot: typed scores, one per (team, judge, round).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedEvent {
    pub event: Event,
    pub teams: Vec<Team>,
    pub judges: Vec<Judge>,
    pub scores: Vec<Score>,
}

/// Validate a snapshot and turn its raw scores into [`Score`]s.
/// Returns all validation errors at once (not just the first).
pub fn validate_snapshot(
    snapshot: EventSnapshot,
    config: &Config,
) -> Result<LoadedEvent, Vec<String>> {
    let mut errors = Vec::new();
    let event = &snapshot.event;

    if let Err(e) = validate_event(event, &config.criterion_maxima()) {
        errors.extend(e);
    }

    let teams: HashMap<&str, &Team> = snapshot
        .teams
        .iter()
        .filter(|t| t.event_id == event.id)
        .map(|t| (t.id.as_str(), t))
        .collect();
    let judges: HashMap<&str, &Judge> = snapshot
        .judges
        .iter()
        .map(|j| (j.id.as_str(), j))
        .collect();

    for team in snapshot.teams.iter().filter(|t| t.event_id == event.id) {
        if !event.domains.contains(&team.domain) {
            errors.push(format!(
                "team {}.domain: '{}' is not an event domain",
                team.id, team.domain
            ));
        }
    }

    let limits = config.score_limits();
    let mut scores = Vec::with_capacity(snapshot.scores.len());
    for input in snapshot.scores.iter().filter(|s| s.event_id == event.id) {
        if !teams.contains_key(input.team_id.as_str()) {
            errors.push(format!("score {}.teamId: unknown team '{}'", input.id, input.team_id));
        }
        match judges.get(input.judge_id.as_str()) {
            None => errors.push(format!(
                "score {}.judgeId: unknown judge '{}'",
                input.id, input.judge_id
            )),
            Some(judge) if !judge.can_score(input.round) => errors.push(format!(
                "score {}.round: {:?} judge {} cannot score {}",
                input.id, judge.judge_type, judge.id, input.round
            )),
            Some(_) => {}
        }
        match validate_score(input, &event.scoring_criteria, &limits) {
            Ok(score) => scores.push(score),
            Err(e) => errors.extend(e),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let scores = latest_submissions(scores);
    Ok(LoadedEvent {
        event: snapshot.event,
        teams: snapshot.teams,
        judges: snapshot.judges,
        scores,
    })
}
