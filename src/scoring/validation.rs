use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::aggregate::round_half_up;
use crate::model::{Event, Round, Score, ScoringCriterion};

/// Largest bonus a judge may award unless configured otherwise
pub const DEFAULT_BONUS_MAX: f64 = 5.0;

/// Criterion maxima accepted unless configured otherwise
pub const DEFAULT_CRITERION_MAXIMA: [u32; 2] = [15, 20];

// Slack allowed between a submitted total and the recomputed one
const TOTAL_TOLERANCE: f64 = 0.05;

/// A score as submitted by a judge, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInput {
    pub id: String,
    pub event_id: String,
    pub team_id: String,
    pub judge_id: String,
    #[serde(default)]
    pub judge_name: String,
    pub round: Round,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub bonus_score: Option<f64>,
    /// Total as computed by the submitting client; checked, never trusted
    #[serde(default)]
    pub total_score: Option<f64>,
    #[serde(default = "default_finalized")]
    pub is_finalized: bool,
    pub submitted_at: DateTime<Utc>,
}

fn default_finalized() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreLimits {
    pub bonus_max: f64,
}

impl Default for ScoreLimits {
    fn default() -> Self {
        Self {
            bonus_max: DEFAULT_BONUS_MAX,
        }
    }
}

/// Validate a submitted score against the event's criteria and build the
/// typed [`Score`]. Returns all validation errors at once (not just the first).
///
/// Drafts may leave criteria blank; finalized scores must fill every one.
pub fn validate_score(
    input: &ScoreInput,
    criteria: &[ScoringCriterion],
    limits: &ScoreLimits,
) -> Result<Score, Vec<String>> {
    let mut errors = Vec::new();
    let prefix = format!("score {}", input.id);

    for criterion in criteria {
        match input.scores.get(&criterion.id) {
            None if input.is_finalized => {
                errors.push(format!(
                    "{}.scores.{}: missing value for finalized score",
                    prefix, criterion.id
                ));
            }
            None => {}
            Some(value) if !value.is_finite() => {
                errors.push(format!("{}.scores.{}: must be a finite number", prefix, criterion.id));
            }
            Some(value) if *value < 0.0 || *value > f64::from(criterion.max_score) => {
                errors.push(format!(
                    "{}.scores.{}: {} outside 0-{}",
                    prefix, criterion.id, value, criterion.max_score
                ));
            }
            Some(_) => {}
        }
    }

    for id in input.scores.keys() {
        if !criteria.iter().any(|c| &c.id == id) {
            errors.push(format!("{}.scores.{}: unknown criterion", prefix, id));
        }
    }

    if let Some(bonus) = input.bonus_score {
        if !bonus.is_finite() || !(0.0..=limits.bonus_max).contains(&bonus) {
            errors.push(format!(
                "{}.bonusScore: {} outside 0-{}",
                prefix, bonus, limits.bonus_max
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let criteria_sum: f64 = input.scores.values().sum();
    let total = round_half_up(criteria_sum + input.bonus_score.unwrap_or(0.0), 1);

    if let Some(submitted) = input.total_score {
        if !submitted.is_finite() || (submitted - total).abs() > TOTAL_TOLERANCE {
            return Err(vec![format!(
                "{}.totalScore: {} does not match criteria plus bonus ({})",
                prefix, submitted, total
            )]);
        }
    }

    Ok(Score {
        id: input.id.clone(),
        event_id: input.event_id.clone(),
        team_id: input.team_id.clone(),
        judge_id: input.judge_id.clone(),
        judge_name: input.judge_name.clone(),
        round: input.round,
        scores: input.scores.clone(),
        bonus_score: input.bonus_score,
        total_score: total,
        is_finalized: input.is_finalized,
        submitted_at: input.submitted_at,
    })
}

/// Validate event setup: domains and criteria present, ids unique, maxima canonical.
pub fn validate_event(event: &Event, criterion_maxima: &[u32]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if event.domains.is_empty() {
        errors.push(format!("event {}.domains: at least one domain is required", event.id));
    }
    let mut seen = HashSet::new();
    for domain in &event.domains {
        if !seen.insert(domain.as_str()) {
            errors.push(format!("event {}.domains: duplicate domain '{}'", event.id, domain));
        }
    }

    if event.scoring_criteria.is_empty() {
        errors.push(format!(
            "event {}.scoringCriteria: at least one criterion is required",
            event.id
        ));
    }
    let mut seen = HashSet::new();
    for (i, criterion) in event.scoring_criteria.iter().enumerate() {
        if !seen.insert(criterion.id.as_str()) {
            errors.push(format!(
                "event {}.scoringCriteria[{}]: duplicate id '{}'",
                event.id, i, criterion.id
            ));
        }
        if !criterion_maxima.contains(&criterion.max_score) {
            errors.push(format!(
                "event {}.scoringCriteria[{}].maxScore: {} is not one of {:?}",
                event.id, i, criterion.max_score, criterion_maxima
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
