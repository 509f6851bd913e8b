use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{EngineError, Result};
use crate::model::{Judge, Round, Team};

/// Which domain each judge is locked to within one round.
///
/// Built once from the team directory (or kept up to date by the caller as
/// allocations are committed) instead of rescanning every team per check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainLocks {
    by_domain: BTreeMap<String, BTreeSet<String>>,
    by_judge: HashMap<String, String>,
}

impl DomainLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the judges already allocated in `round` across the given teams.
    ///
    /// A judge seen in two domains stays locked to the first one.
    pub fn from_teams<'a, I>(teams: I, round: Round) -> Self
    where
        I: IntoIterator<Item = &'a Team>,
    {
        let mut locks = Self::new();
        for team in teams {
            for judge_id in team.allocated_judges.for_round(round) {
                if !locks.by_judge.contains_key(judge_id) {
                    locks.insert(&team.domain, judge_id);
                }
            }
        }
        locks
    }

    fn insert(&mut self, domain: &str, judge_id: &str) {
        self.by_judge.insert(judge_id.to_string(), domain.to_string());
        self.by_domain
            .entry(domain.to_string())
            .or_default()
            .insert(judge_id.to_string());
    }

    /// Lock judges to `domain`. Fails without changing anything if any of
    /// them is already locked to another domain.
    pub fn lock(&mut self, domain: &str, judge_ids: &[String]) -> Result<()> {
        let conflicts: Vec<String> = judge_ids
            .iter()
            .filter_map(|j| match self.locked_domain(j) {
                Some(other) if other != domain => Some(format!("{} (locked to {})", j, other)),
                _ => None,
            })
            .collect();

        if !conflicts.is_empty() {
            return Err(EngineError::InvalidAllocation(format!(
                "judges already allocated to another domain: {}",
                conflicts.join(", ")
            )));
        }

        for judge_id in judge_ids {
            self.insert(domain, judge_id);
        }
        Ok(())
    }

    /// Release every judge locked to `domain`, returning their ids.
    pub fn release(&mut self, domain: &str) -> Vec<String> {
        let released: Vec<String> = self
            .by_domain
            .remove(domain)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();
        for judge_id in &released {
            self.by_judge.remove(judge_id);
        }
        released
    }

    pub fn locked_domain(&self, judge_id: &str) -> Option<&str> {
        self.by_judge.get(judge_id).map(String::as_str)
    }

    /// Judges locked to `domain`, sorted by id.
    pub fn judges_in(&self, domain: &str) -> Vec<&str> {
        self.by_domain
            .get(domain)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Free, or already locked to this same domain.
    pub fn is_available(&self, judge_id: &str, domain: &str) -> bool {
        self.locked_domain(judge_id).is_none_or(|d| d == domain)
    }

    /// Judges of the right type for `round` that may still be picked for `domain`.
    pub fn available_judges<'a>(
        &self,
        judges: &'a [Judge],
        round: Round,
        domain: &str,
    ) -> Vec<&'a Judge> {
        judges
            .iter()
            .filter(|j| j.can_score(round) && self.is_available(&j.id, domain))
            .collect()
    }
}
