use serde::{Deserialize, Serialize};

use crate::scoring::validation::{DEFAULT_BONUS_MAX, DEFAULT_CRITERION_MAXIMA};
use crate::scoring::{RankingOptions, ScoreLimits, DEFAULT_TOP_N};

/// Engine configuration.
///
/// Every field is optional; unset fields fall back to the built-in rules.
///
/// Example YAML:
/// ```yaml
/// cohort_size: 3
/// show_unscored: false
/// bonus_max: 5
/// criterion_maxima: [15, 20]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Teams per domain that advance to Round 2 (default: 3)
    #[serde(default)]
    pub cohort_size: Option<usize>,

    /// List teams with no finalized score in rankings (default: false)
    #[serde(default)]
    pub show_unscored: Option<bool>,

    /// Largest bonus a judge may award (default: 5)
    #[serde(default)]
    pub bonus_max: Option<f64>,

    /// Allowed criterion maximum scores (default: [15, 20])
    #[serde(default)]
    pub criterion_maxima: Option<Vec<u32>>,
}

impl Config {
    pub fn cohort_size(&self) -> usize {
        self.cohort_size.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn criterion_maxima(&self) -> Vec<u32> {
        self.criterion_maxima
            .clone()
            .unwrap_or_else(|| DEFAULT_CRITERION_MAXIMA.to_vec())
    }

    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            top_n: self.cohort_size(),
            show_unscored: self.show_unscored.unwrap_or(false),
        }
    }

    pub fn score_limits(&self) -> ScoreLimits {
        ScoreLimits {
            bonus_max: self.bonus_max.unwrap_or(DEFAULT_BONUS_MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.cohort_size(), 3);
        assert_eq!(config.criterion_maxima(), vec![15, 20]);
        assert_eq!(config.score_limits().bonus_max, 5.0);
        assert!(!config.ranking_options().show_unscored);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
cohort_size: 2
show_unscored: true
bonus_max: 3
criterion_maxima: [10, 15, 20]
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.cohort_size(), 2);
        assert_eq!(config.score_limits().bonus_max, 3.0);
        assert_eq!(config.criterion_maxima(), vec![10, 15, 20]);
        assert_eq!(
            config.ranking_options(),
            RankingOptions {
                top_n: 2,
                show_unscored: true
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("top_n: 4");
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config {
            cohort_size: Some(4),
            show_unscored: None,
            bonus_max: Some(2.5),
            criterion_maxima: None,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
