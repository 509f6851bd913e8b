use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::model::{Round, Team};

/// How teams are spread over the selected judges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationMode {
    /// One judge per team, cycling through the judges (Round 1)
    RoundRobin,
    /// Every judge evaluates every team (Round 2)
    FullMesh,
}

impl From<Round> for AllocationMode {
    fn from(round: Round) -> Self {
        match round {
            Round::One => AllocationMode::RoundRobin,
            Round::Two => AllocationMode::FullMesh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub team_id: String,
    pub judge_ids: Vec<String>,
}

/// Judges assigned to each team for one round, teams in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub round: Round,
    pub mode: AllocationMode,
    /// Judges the allocation was run with, in selection order
    pub judge_ids: Vec<String>,
    pub assignments: Vec<TeamAssignment>,
}

impl Allocation {
    pub fn judges_for(&self, team_id: &str) -> Option<&[String]> {
        self.assignments
            .iter()
            .find(|a| a.team_id == team_id)
            .map(|a| a.judge_ids.as_slice())
    }

    /// Team ids a judge has to evaluate, in allocation order.
    pub fn teams_for(&self, judge_id: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.judge_ids.iter().any(|j| j == judge_id))
            .map(|a| a.team_id.as_str())
            .collect()
    }

    /// Number of teams per judge, in selection order.
    pub fn judge_load(&self) -> Vec<(&str, usize)> {
        self.judge_ids
            .iter()
            .map(|j| (j.as_str(), self.teams_for(j).len()))
            .collect()
    }

    /// Write the assignment into the teams' per-round allocation. Returns how
    /// many teams were updated.
    pub fn apply_to(&self, teams: &mut [Team]) -> usize {
        let mut updated = 0;
        for team in teams.iter_mut() {
            if let Some(judges) = self.judges_for(&team.id) {
                team.allocated_judges.set_round(self.round, judges.to_vec());
                updated += 1;
            }
        }
        updated
    }
}

/// Assign `judge_ids` to `teams` for `round` using the round's mode.
///
/// Domain locking is not checked here; callers select judges through
/// [`super::planner`] first.
pub fn allocate<'a, I>(teams: I, judge_ids: &[String], round: Round) -> Result<Allocation>
where
    I: IntoIterator<Item = &'a Team>,
{
    allocate_with_mode(teams, judge_ids, round, AllocationMode::from(round))
}

pub fn allocate_with_mode<'a, I>(
    teams: I,
    judge_ids: &[String],
    round: Round,
    mode: AllocationMode,
) -> Result<Allocation>
where
    I: IntoIterator<Item = &'a Team>,
{
    if judge_ids.is_empty() {
        return Err(EngineError::InvalidAllocation(
            "at least one judge must be selected".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = judge_ids
        .iter()
        .filter(|j| !seen.insert(j.as_str()))
        .map(String::as_str)
        .collect();
    if !duplicates.is_empty() {
        return Err(EngineError::InvalidAllocation(format!(
            "judges selected more than once: {}",
            duplicates.join(", ")
        )));
    }

    let assignments: Vec<TeamAssignment> = match mode {
        AllocationMode::RoundRobin => teams
            .into_iter()
            .enumerate()
            .map(|(i, team)| TeamAssignment {
                team_id: team.id.clone(),
                judge_ids: vec![judge_ids[i % judge_ids.len()].clone()],
            })
            .collect(),
        AllocationMode::FullMesh => teams
            .into_iter()
            .map(|team| TeamAssignment {
                team_id: team.id.clone(),
                judge_ids: judge_ids.to_vec(),
            })
            .collect(),
    };

    debug!(
        round = %round,
        mode = ?mode,
        teams = assignments.len(),
        judges = judge_ids.len(),
        "allocated judges"
    );

    Ok(Allocation {
        round,
        mode,
        judge_ids: judge_ids.to_vec(),
        assignments,
    })
}
