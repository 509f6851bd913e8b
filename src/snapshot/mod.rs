pub mod storage;
pub mod types;

pub use storage::{
    default_cohort_path, load_cohort_snapshot, load_event_snapshot, save_cohort_snapshot,
};
pub use types::{validate_snapshot, EventSnapshot, LoadedEvent};
