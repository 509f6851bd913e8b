pub mod types;

pub use types::{
    AllocatedJudges, Event, Judge, JudgeType, QualificationStatus, Round, Score, ScoringCriterion,
    Team,
};
