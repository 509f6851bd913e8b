pub mod formatter;

pub use formatter::{
    format_age, format_allocation, format_cohort, format_domain_rankings, format_progress,
    format_ranked_table, format_score, format_statuses, format_tsv, should_use_colors,
};
