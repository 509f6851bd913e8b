use super::assigner::{allocate, Allocation};
use crate::error::{EngineError, Result};
use crate::model::{Round, Team};

/// Round 1 allocation lifecycle of a single domain.
///
/// `Unallocated -> Allocating -> Allocated -> Editable -> Allocating`.
/// Only [`AllocationPhase::commit`] produces an assignment to persist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllocationPhase {
    #[default]
    Unallocated,
    /// Judges picked, nothing persisted yet
    Allocating {
        judge_ids: Vec<String>,
        previous: Option<Allocation>,
    },
    Allocated(Allocation),
    /// Reopened for changes; the last committed allocation still applies
    Editable(Allocation),
}

impl AllocationPhase {
    pub fn name(&self) -> &'static str {
        match self {
            AllocationPhase::Unallocated => "Unallocated",
            AllocationPhase::Allocating { .. } => "Allocating",
            AllocationPhase::Allocated(_) => "Allocated",
            AllocationPhase::Editable(_) => "Editable",
        }
    }

    /// The allocation currently in force, if any.
    pub fn allocation(&self) -> Option<&Allocation> {
        match self {
            AllocationPhase::Unallocated => None,
            AllocationPhase::Allocating { previous, .. } => previous.as_ref(),
            AllocationPhase::Allocated(a) | AllocationPhase::Editable(a) => Some(a),
        }
    }

    fn invalid(&self, requested: &str) -> EngineError {
        EngineError::InvalidTransition {
            current: self.name().to_string(),
            requested: requested.to_string(),
        }
    }

    /// Pick (or re-pick) judges. Not allowed while allocated; reopen first.
    pub fn select_judges(&mut self, judge_ids: Vec<String>) -> Result<()> {
        let previous = match std::mem::take(self) {
            AllocationPhase::Unallocated => None,
            AllocationPhase::Allocating { previous, .. } => previous,
            AllocationPhase::Editable(a) => Some(a),
            allocated @ AllocationPhase::Allocated(_) => {
                let err = allocated.invalid("Allocating");
                *self = allocated;
                return Err(err);
            }
        };
        *self = AllocationPhase::Allocating {
            judge_ids,
            previous,
        };
        Ok(())
    }

    /// Distribute `teams` over the selected judges and move to `Allocated`.
    /// On error the phase is left unchanged.
    pub fn commit<'a, I>(&mut self, teams: I) -> Result<&Allocation>
    where
        I: IntoIterator<Item = &'a Team>,
    {
        let AllocationPhase::Allocating { judge_ids, .. } = &*self else {
            return Err(self.invalid("Allocated"));
        };
        let allocation = allocate(teams, judge_ids, Round::One)?;
        *self = AllocationPhase::Allocated(allocation);
        self.allocation().ok_or_else(|| self.invalid("Allocated"))
    }

    /// Reopen a committed allocation for changes.
    pub fn reopen(&mut self) -> Result<()> {
        match std::mem::take(self) {
            AllocationPhase::Allocated(a) => {
                *self = AllocationPhase::Editable(a);
                Ok(())
            }
            other => {
                let err = other.invalid("Editable");
                *self = other;
                Err(err)
            }
        }
    }
}
