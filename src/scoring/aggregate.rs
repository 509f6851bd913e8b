use std::collections::HashMap;

use crate::model::{Round, Score};

/// Decimal places kept on an average total.
pub const AVERAGE_DECIMALS: i32 = 2;

/// Average of a team's finalized totals, plus how many scores went into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub average: f64,
    pub count: usize,
}

/// Average total score for a team, or 0.0 if it has no finalized scores.
pub fn aggregate(team_id: &str, scores: &[Score]) -> f64 {
    aggregate_detail(team_id, scores)
        .map(|a| a.average)
        .unwrap_or(0.0)
}

/// Like [`aggregate`], but returns `None` for a team nobody has scored yet so
/// callers can tell "scored 0" apart from "not scored".
pub fn aggregate_detail(team_id: &str, scores: &[Score]) -> Option<Aggregate> {
    let mut totals: Vec<f64> = scores
        .iter()
        .filter(|s| s.team_id == team_id && s.is_finalized)
        .map(|s| s.total_score)
        .collect();

    if totals.is_empty() {
        return None;
    }

    // Fixed summation order keeps the mean independent of submission order
    totals.sort_by(f64::total_cmp);
    let sum: f64 = totals.iter().sum();
    let count = totals.len();

    Some(Aggregate {
        average: round_half_up(sum / count as f64, AVERAGE_DECIMALS),
        count,
    })
}

/// Round to `decimals` places, halves going up.
pub(crate) fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    // Absorb representation error (2.675 * 100 = 267.49999...) before flooring
    let snapped = (scaled * 1e6).round() / 1e6;
    (snapped + 0.5).floor() / factor
}

/// Scores for one event and round.
pub fn scores_for(scores: &[Score], event_id: &str, round: Round) -> Vec<Score> {
    scores
        .iter()
        .filter(|s| s.event_id == event_id && s.round == round)
        .cloned()
        .collect()
}

/// Collapse resubmissions: keep only the newest score per (team, judge, round).
///
/// A finalized score is never replaced by a draft, only by a newer finalized
/// one; drafts are replaced by anything newer and by any finalized score.
/// A later position in the input wins when timestamps are equal. The surviving
/// score takes the position of the first submission.
pub fn latest_submissions(scores: Vec<Score>) -> Vec<Score> {
    let mut slots: HashMap<(String, String, Round), usize> = HashMap::new();
    let mut kept: Vec<Score> = Vec::with_capacity(scores.len());

    for score in scores {
        let key = (score.team_id.clone(), score.judge_id.clone(), score.round);
        match slots.get(&key) {
            Some(&idx) => {
                if supersedes(&score, &kept[idx]) {
                    kept[idx] = score;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(score);
            }
        }
    }

    kept
}

fn supersedes(candidate: &Score, current: &Score) -> bool {
    match (candidate.is_finalized, current.is_finalized) {
        (false, true) => false,
        (true, false) => true,
        _ => candidate.submitted_at >= current.submitted_at,
    }
}
