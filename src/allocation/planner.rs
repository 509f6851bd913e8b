use tracing::info;

use super::assigner::{allocate, Allocation};
use super::locks::DomainLocks;
use crate::error::{EngineError, Result};
use crate::model::{Judge, JudgeType, Round, Team};

/// Check the judge selection for one domain's Round 1 allocation, then
/// distribute that domain's teams round-robin over it.
pub fn plan_round_one(
    teams: &[Team],
    judges: &[Judge],
    locks: &DomainLocks,
    event_id: &str,
    domain: &str,
    selected: &[String],
) -> Result<Allocation> {
    if !judges.iter().any(|j| j.judge_type == JudgeType::Internal) {
        return Err(EngineError::InvalidAllocation(
            "no internal judges exist for Round 1".to_string(),
        ));
    }
    if selected.is_empty() {
        return Err(EngineError::InvalidAllocation(format!(
            "no judges selected for domain {}",
            domain
        )));
    }

    let mut problems = Vec::new();
    for judge_id in selected {
        match judges.iter().find(|j| &j.id == judge_id) {
            None => problems.push(format!("{} is not a known judge", judge_id)),
            Some(j) if !j.can_score(Round::One) => {
                problems.push(format!("{} is not an internal judge", judge_id))
            }
            Some(_) => {}
        }
        if let Some(other) = locks.locked_domain(judge_id) {
            if other != domain {
                problems.push(format!("{} is already allocated to {}", judge_id, other));
            }
        }
    }
    if !problems.is_empty() {
        return Err(EngineError::InvalidAllocation(problems.join("; ")));
    }

    let domain_teams = teams
        .iter()
        .filter(|t| t.event_id == event_id && t.domain == domain);
    let allocation = allocate(domain_teams, selected, Round::One)?;
    info!(
        domain,
        teams = allocation.assignments.len(),
        judges = selected.len(),
        "planned Round 1 allocation"
    );
    Ok(allocation)
}

/// Give every external judge every team of a frozen Round 2 cohort.
///
/// `cohort` should come from a snapshot taken before allocation starts, not
/// from a fresh cohort query.
pub fn plan_round_two<'a, I>(cohort: I, judges: &[Judge]) -> Result<Allocation>
where
    I: IntoIterator<Item = &'a Team>,
{
    let cohort: Vec<&Team> = cohort.into_iter().collect();
    if cohort.is_empty() {
        return Err(EngineError::InvalidAllocation(
            "Round 1 results are required before Round 2 allocation".to_string(),
        ));
    }

    let external: Vec<String> = judges
        .iter()
        .filter(|j| j.can_score(Round::Two))
        .map(|j| j.id.clone())
        .collect();
    if external.is_empty() {
        return Err(EngineError::InvalidAllocation(
            "no external judges exist for Round 2".to_string(),
        ));
    }

    let allocation = allocate(cohort, &external, Round::Two)?;
    info!(
        teams = allocation.assignments.len(),
        judges = external.len(),
        "planned Round 2 allocation"
    );
    Ok(allocation)
}
