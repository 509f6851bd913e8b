use serde::{Deserialize, Serialize};
use std::fmt;

use super::aggregate::round_half_up;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandLabel {
    Low,
    Average,
    Excellent,
}

impl fmt::Display for BandLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BandLabel::Low => "Low",
            BandLabel::Average => "Average",
            BandLabel::Excellent => "Excellent",
        };
        write!(f, "{}", s)
    }
}

/// Quick-pick range a judge can score a criterion in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    pub label: BandLabel,
    pub min: f64,
    pub max: f64,
}

const fn band(label: BandLabel, min: f64, max: f64) -> ScoreBand {
    ScoreBand { label, min, max }
}

// Low starts at 2 on every scale
const BANDS_15: [ScoreBand; 3] = [
    band(BandLabel::Low, 2.0, 5.0),
    band(BandLabel::Average, 6.0, 10.0),
    band(BandLabel::Excellent, 11.0, 15.0),
];

const BANDS_20: [ScoreBand; 3] = [
    band(BandLabel::Low, 2.0, 7.0),
    band(BandLabel::Average, 8.0, 14.0),
    band(BandLabel::Excellent, 15.0, 20.0),
];

/// Bands for a criterion maximum, if it is one of the canonical scales.
pub fn bands_for(max_score: u32) -> Option<&'static [ScoreBand]> {
    match max_score {
        15 => Some(&BANDS_15),
        20 => Some(&BANDS_20),
        _ => None,
    }
}

/// Band a criterion value falls in. Values between two bands belong to the
/// upper one; values below the lowest band are unclassified.
pub fn classify(max_score: u32, value: f64) -> Option<BandLabel> {
    let bands = bands_for(max_score)?;
    if value < bands[0].min || value > f64::from(max_score) {
        return None;
    }
    bands.iter().find(|b| value <= b.max).map(|b| b.label)
}

/// Value a one-click pick of `band` fills in: the top of Excellent, otherwise
/// the band midpoint to one decimal.
pub fn suggested_score(band: &ScoreBand) -> f64 {
    match band.label {
        BandLabel::Excellent => band.max,
        _ => round_half_up((band.min + band.max) / 2.0, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_canonical_max_has_no_bands() {
        assert!(bands_for(10).is_none());
        assert_eq!(classify(10, 5.0), None);
    }

    #[test]
    fn test_classify_fifteen_scale() {
        assert_eq!(classify(15, 2.0), Some(BandLabel::Low));
        assert_eq!(classify(15, 5.0), Some(BandLabel::Low));
        assert_eq!(classify(15, 5.5), Some(BandLabel::Average));
        assert_eq!(classify(15, 10.0), Some(BandLabel::Average));
        assert_eq!(classify(15, 15.0), Some(BandLabel::Excellent));
        assert_eq!(classify(15, 1.0), None);
        assert_eq!(classify(15, 16.0), None);
    }

    #[test]
    fn test_classify_twenty_scale() {
        assert_eq!(classify(20, 7.0), Some(BandLabel::Low));
        assert_eq!(classify(20, 8.0), Some(BandLabel::Average));
        assert_eq!(classify(20, 14.5), Some(BandLabel::Excellent));
    }

    #[test]
    fn test_suggested_scores() {
        let fifteen = bands_for(15).unwrap();
        assert_eq!(suggested_score(&fifteen[0]), 3.5);
        assert_eq!(suggested_score(&fifteen[1]), 8.0);
        assert_eq!(suggested_score(&fifteen[2]), 15.0);

        let twenty = bands_for(20).unwrap();
        assert_eq!(suggested_score(&twenty[0]), 4.5);
        assert_eq!(suggested_score(&twenty[1]), 11.0);
        assert_eq!(suggested_score(&twenty[2]), 20.0);
    }
}
