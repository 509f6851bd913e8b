use super::aggregate::scores_for;
use super::cohort::round_two_cohort_with;
use super::ranking::leaderboard;
use crate::model::{QualificationStatus, Round, Score, Team};

/// Status of every event team once Round 1 closes: cohort members qualify,
/// everyone else is eliminated.
pub fn round_one_statuses<'a>(
    teams: &'a [Team],
    scores: &[Score],
    event_id: &str,
    per_domain: usize,
) -> Vec<(&'a Team, QualificationStatus)> {
    let cohort = round_two_cohort_with(teams, scores, event_id, per_domain);
    teams
        .iter()
        .filter(|t| t.event_id == event_id)
        .map(|t| {
            let status = if cohort.iter().any(|c| c.id == t.id) {
                QualificationStatus::Qualified
            } else {
                QualificationStatus::Eliminated
            };
            (t, status)
        })
        .collect()
}

/// Status of the Round 2 cohort once Round 2 closes: the leader wins, the
/// rest stay qualified. Nobody wins until some Round 2 score exists.
pub fn final_statuses<'a>(
    cohort: &[&'a Team],
    scores: &[Score],
    event_id: &str,
) -> Vec<(&'a Team, QualificationStatus)> {
    let round_two = scores_for(scores, event_id, Round::Two);
    let board = leaderboard(cohort.iter().copied(), &round_two, false);
    let winner = board.first().map(|r| r.team.id.as_str());

    cohort
        .iter()
        .map(|t| {
            let status = if Some(t.id.as_str()) == winner {
                QualificationStatus::Winner
            } else {
                QualificationStatus::Qualified
            };
            (*t, status)
        })
        .collect()
}
