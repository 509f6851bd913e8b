pub mod assigner;
pub mod locks;
pub mod planner;
pub mod state;

pub use assigner::{allocate, allocate_with_mode, Allocation, AllocationMode, TeamAssignment};
pub use locks::DomainLocks;
pub use planner::{plan_round_one, plan_round_two};
pub use state::AllocationPhase;
