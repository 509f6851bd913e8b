//! Error types for engine operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),

    #[error("Empty cohort: no finalized Round 1 scores for event {event_id}")]
    EmptyCohort { event_id: String },

    #[error("Invalid allocation transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
