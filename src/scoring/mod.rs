pub mod aggregate;
pub mod cohort;
pub mod levels;
pub mod progress;
pub mod ranking;
pub mod status;
pub mod validation;

pub use aggregate::{aggregate, aggregate_detail, latest_submissions, scores_for, Aggregate};
pub use cohort::{is_in_cohort, round_two_cohort, round_two_cohort_with, CohortSnapshot};
pub use levels::{classify, suggested_score, BandLabel, ScoreBand};
pub use progress::{round_progress, ScoringProgress};
pub use ranking::{
    domain_rankings, leaderboard, rank, score_teams, top_n_per_domain, top_n_per_domain_with,
    DomainRanking, RankedTeam, RankingOptions, ScoredTeam, DEFAULT_TOP_N,
};
pub use status::{final_statuses, round_one_statuses};
pub use validation::{validate_event, validate_score, ScoreInput, ScoreLimits};
