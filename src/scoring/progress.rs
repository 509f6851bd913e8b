use std::collections::HashSet;

use crate::model::{Round, Score, Team};

/// How far scoring for a round has got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringProgress {
    pub round: Round,
    pub total_teams: usize,
    pub scored_teams: usize,
    /// Ids of teams with no finalized score yet, in input order
    pub unscored: Vec<String>,
}

impl ScoringProgress {
    /// Every team has at least one finalized score.
    pub fn is_complete(&self) -> bool {
        self.scored_teams == self.total_teams
    }
}

/// Count teams with at least one finalized score in `round`.
///
/// Ranking never waits on this; it is for callers that want to hold back an
/// action (e.g. publishing Round 1 results) until scoring is finished.
pub fn round_progress<'a, I>(teams: I, scores: &[Score], round: Round) -> ScoringProgress
where
    I: IntoIterator<Item = &'a Team>,
{
    let scored: HashSet<&str> = scores
        .iter()
        .filter(|s| s.round == round && s.is_finalized)
        .map(|s| s.team_id.as_str())
        .collect();

    let mut total_teams = 0;
    let mut unscored = Vec::new();
    for team in teams {
        total_teams += 1;
        if !scored.contains(team.id.as_str()) {
            unscored.push(team.id.clone());
        }
    }

    ScoringProgress {
        round,
        total_teams,
        scored_teams: total_teams - unscored.len(),
        unscored,
    }
}
