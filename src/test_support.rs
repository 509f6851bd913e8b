use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;

use crate::model::{Judge, JudgeType, Round, Score, Team};

pub fn team(id: &str, domain: &str) -> Team {
    Team {
        id: id.to_string(),
        event_id: "e1".to_string(),
        team_name: format!("Team {}", id),
        domain: domain.to_string(),
        problem_statement: None,
        qualification_status: Default::default(),
        allocated_judges: Default::default(),
    }
}

pub fn judge(id: &str, judge_type: JudgeType) -> Judge {
    Judge {
        id: id.to_string(),
        name: format!("Judge {}", id),
        judge_type,
    }
}

pub fn score(team_id: &str, judge_id: &str, total: f64) -> Score {
    score_in_round(team_id, judge_id, total, Round::One)
}

pub fn score_in_round(team_id: &str, judge_id: &str, total: f64, round: Round) -> Score {
    Score {
        id: format!("{}-{}-{}", team_id, judge_id, round),
        event_id: "e1".to_string(),
        team_id: team_id.to_string(),
        judge_id: judge_id.to_string(),
        judge_name: format!("Judge {}", judge_id),
        round,
        scores: BTreeMap::new(),
        bonus_score: None,
        total_score: total,
        is_finalized: true,
        submitted_at: Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap(),
    }
}

pub fn ids(teams: &[&Team]) -> Vec<String> {
    teams.iter().map(|t| t.id.clone()).collect()
}
