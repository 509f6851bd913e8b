use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Evaluation phase. Round 1 is domain-scoped, Round 2 is the cross-domain cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "Round 1")]
    One,
    #[serde(rename = "Round 2")]
    Two,
}

impl Round {
    /// Judge type allowed to score this round.
    pub fn judge_type(self) -> JudgeType {
        match self {
            Round::One => JudgeType::Internal,
            Round::Two => JudgeType::External,
        }
    }

    /// Parse "1", "2", "Round 1", "round2" and similar spellings.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.trim_start_matches("round") {
            "1" => Some(Round::One),
            "2" => Some(Round::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::One => write!(f, "Round 1"),
            Round::Two => write!(f, "Round 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QualificationStatus {
    #[default]
    Pending,
    Qualified,
    Eliminated,
    Winner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JudgeType {
    Internal,
    External,
}

impl JudgeType {
    /// The only round this judge type may submit scores for.
    pub fn round(self) -> Round {
        match self {
            JudgeType::Internal => Round::One,
            JudgeType::External => Round::Two,
        }
    }
}

/// Judge ids allocated to a team, per round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedJudges {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub round1: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub round2: Vec<String>,
}

impl AllocatedJudges {
    pub fn for_round(&self, round: Round) -> &[String] {
        match round {
            Round::One => &self.round1,
            Round::Two => &self.round2,
        }
    }

    pub fn set_round(&mut self, round: Round, judge_ids: Vec<String>) {
        match round {
            Round::One => self.round1 = judge_ids,
            Round::Two => self.round2 = judge_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub event_id: String,
    pub team_name: String,
    pub domain: String,
    #[serde(default)]
    pub problem_statement: Option<String>,
    #[serde(default)]
    pub qualification_status: QualificationStatus,
    #[serde(default)]
    pub allocated_judges: AllocatedJudges,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judge {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub judge_type: JudgeType,
}

impl Judge {
    pub fn can_score(&self, round: Round) -> bool {
        self.judge_type.round() == round
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringCriterion {
    pub id: String,
    pub name: String,
    pub max_score: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    /// Domains in display order.
    pub domains: Vec<String>,
    pub scoring_criteria: Vec<ScoringCriterion>,
}

/// A validated judge score. Built from a `ScoreInput` by `scoring::validation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: String,
    pub event_id: String,
    pub team_id: String,
    pub judge_id: String,
    pub judge_name: String,
    pub round: Round,
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub bonus_score: Option<f64>,
    pub total_score: f64,
    pub is_finalized: bool,
    pub submitted_at: DateTime<Utc>,
}
