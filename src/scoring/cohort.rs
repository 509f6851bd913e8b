use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use super::aggregate::scores_for;
use super::ranking::{top_n_per_domain, DEFAULT_TOP_N};
use crate::error::{EngineError, Result};
use crate::model::{Round, Score, Team};

/// Current cohort format version
pub const COHORT_SNAPSHOT_VERSION: u32 = 1;

fn cohort_ids<'a>(
    teams: &'a [Team],
    scores: &[Score],
    event_id: &str,
    per_domain: usize,
) -> HashSet<&'a str> {
    let round_one = scores_for(scores, event_id, Round::One);
    let event_teams = teams.iter().filter(|t| t.event_id == event_id);

    top_n_per_domain(event_teams, &round_one, per_domain)
        .into_iter()
        .map(|r| r.team.id.as_str())
        .collect()
}

/// Teams advancing to Round 2: the top 3 of every domain by Round 1 average.
///
/// Always recomputed from the scores passed in. Returned in input order.
pub fn round_two_cohort<'a>(teams: &'a [Team], scores: &[Score], event_id: &str) -> Vec<&'a Team> {
    round_two_cohort_with(teams, scores, event_id, DEFAULT_TOP_N)
}

pub fn round_two_cohort_with<'a>(
    teams: &'a [Team],
    scores: &[Score],
    event_id: &str,
    per_domain: usize,
) -> Vec<&'a Team> {
    let ids = cohort_ids(teams, scores, event_id, per_domain);
    let cohort: Vec<&Team> = teams
        .iter()
        .filter(|t| t.event_id == event_id && ids.contains(t.id.as_str()))
        .collect();
    debug!(event_id, size = cohort.len(), "computed Round 2 cohort");
    cohort
}

pub fn is_in_cohort(team_id: &str, teams: &[Team], scores: &[Score], event_id: &str) -> bool {
    cohort_ids(teams, scores, event_id, DEFAULT_TOP_N).contains(team_id)
}

/// A frozen copy of cohort membership, taken when Round 2 setup starts so
/// late Round 1 corrections cannot change who is being allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSnapshot {
    pub version: u32,
    pub event_id: String,
    pub frozen_at: DateTime<Utc>,
    pub team_ids: Vec<String>,
}

impl CohortSnapshot {
    /// Freeze the current cohort. Fails if no team qualifies yet.
    pub fn freeze(
        teams: &[Team],
        scores: &[Score],
        event_id: &str,
        per_domain: usize,
    ) -> Result<Self> {
        let cohort = round_two_cohort_with(teams, scores, event_id, per_domain);
        if cohort.is_empty() {
            return Err(EngineError::EmptyCohort {
                event_id: event_id.to_string(),
            });
        }

        Ok(Self {
            version: COHORT_SNAPSHOT_VERSION,
            event_id: event_id.to_string(),
            frozen_at: Utc::now(),
            team_ids: cohort.iter().map(|t| t.id.clone()).collect(),
        })
    }

    pub fn contains(&self, team_id: &str) -> bool {
        self.team_ids.iter().any(|id| id == team_id)
    }

    /// Resolve the frozen ids against a team directory, in directory order.
    pub fn teams<'a>(&self, teams: &'a [Team]) -> Vec<&'a Team> {
        teams
            .iter()
            .filter(|t| t.event_id == self.event_id && self.contains(&t.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, score, score_in_round, team};

    fn fintech_and_health() -> (Vec<Team>, Vec<Score>) {
        let teams = vec![
            team("f1", "Fintech"),
            team("f2", "Fintech"),
            team("f3", "Fintech"),
            team("f4", "Fintech"),
            team("h1", "Health"),
            team("h2", "Health"),
            team("h3", "Health"),
            team("h4", "Health"),
        ];
        let scores = vec![
            score("f1", "j1", 95.0),
            score("f2", "j1", 94.0),
            score("f3", "j1", 93.0),
            score("f4", "j1", 92.0),
            score("h1", "j2", 40.0),
            score("h2", "j2", 50.0),
            score("h3", "j2", 60.0),
            score("h4", "j2", 30.0),
        ];
        (teams, scores)
    }

    #[test]
    fn test_third_place_advances_over_other_domains_fourth() {
        let (teams, scores) = fintech_and_health();
        let cohort = round_two_cohort(&teams, &scores, "e1");
        // h1 (40) advances although f4 (92) scored higher
        assert_eq!(ids(&cohort), vec!["f1", "f2", "f3", "h1", "h2", "h3"]);
        assert!(is_in_cohort("h1", &teams, &scores, "e1"));
        assert!(!is_in_cohort("f4", &teams, &scores, "e1"));
    }

    #[test]
    fn test_other_events_excluded() {
        let (mut teams, mut scores) = fintech_and_health();
        let mut foreign = team("x1", "Fintech");
        foreign.event_id = "e2".to_string();
        teams.push(foreign);
        let mut foreign_score = score("x1", "j1", 100.0);
        foreign_score.event_id = "e2".to_string();
        scores.push(foreign_score);

        let cohort = round_two_cohort(&teams, &scores, "e1");
        assert_eq!(cohort.len(), 6);
        assert!(!cohort.iter().any(|t| t.id == "x1"));
    }

    #[test]
    fn test_round_two_scores_do_not_move_cohort() {
        let (teams, mut scores) = fintech_and_health();
        scores.push(score_in_round("f4", "x1", 100.0, Round::Two));
        assert!(!is_in_cohort("f4", &teams, &scores, "e1"));
    }

    #[test]
    fn test_live_recompute_reflects_new_scores() {
        let (teams, mut scores) = fintech_and_health();
        assert!(!is_in_cohort("h4", &teams, &scores, "e1"));
        // h4 averages (30 + 100) / 2 = 65, above h3's 60
        scores.push(score("h4", "j3", 100.0));
        assert!(is_in_cohort("h4", &teams, &scores, "e1"));
        assert!(!is_in_cohort("h1", &teams, &scores, "e1"));
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_scores() {
        let (teams, mut scores) = fintech_and_health();
        let snapshot = CohortSnapshot::freeze(&teams, &scores, "e1", 3).unwrap();
        scores.push(score("h4", "j3", 100.0));

        assert!(snapshot.contains("h1"));
        assert!(!snapshot.contains("h4"));
        assert_eq!(snapshot.teams(&teams).len(), 6);
        assert_eq!(snapshot.version, COHORT_SNAPSHOT_VERSION);
    }

    #[test]
    fn test_freeze_without_scores_fails() {
        let (teams, _) = fintech_and_health();
        let err = CohortSnapshot::freeze(&teams, &[], "e1", 3).unwrap_err();
        assert_eq!(
            err,
            EngineError::EmptyCohort {
                event_id: "e1".to_string()
            }
        );
    }
}
