use serde::{Deserialize, Serialize};

use super::classification::PolicyError;
use super::scoring::ScoreTotals;

pub const DEFAULT_MAX_SCORE: i32 = 55;
pub const RISK_CEILING: i32 = 100;

/// Maps the summed total score onto a percentage.
///
/// `max_score` must match the question catalog's best attainable total
/// (`QuestionCatalog::max_attainable_score`); it is kept here rather than derived so the
/// gauge stays stable when a catalog is swapped at runtime. Results are capped at 100. The
/// lower bound is only applied when `floor_at_zero` is set, so negative totals produce
/// negative percentages by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RiskScaleFields", into = "RiskScaleFields")]
pub struct RiskScale {
    max_score: i32,
    floor_at_zero: bool,
}

impl RiskScale {
    pub fn new(max_score: i32) -> Result<Self, PolicyError> {
        if max_score <= 0 {
            return Err(PolicyError::InvalidMaxScore(max_score));
        }
        Ok(Self {
            max_score,
            floor_at_zero: false,
        })
    }

    pub fn with_floor_at_zero(mut self, floor_at_zero: bool) -> Self {
        self.floor_at_zero = floor_at_zero;
        self
    }

    pub fn max_score(&self) -> i32 {
        self.max_score
    }

    pub fn floors_at_zero(&self) -> bool {
        self.floor_at_zero
    }

    pub fn normalize(&self, totals: &ScoreTotals) -> i32 {
        let percent = round_half_up(i64::from(totals.sum()) * 100, i64::from(self.max_score));
        let capped = percent.min(i64::from(RISK_CEILING));
        let bounded = if self.floor_at_zero {
            capped.max(0)
        } else {
            capped
        };
        // Only the uncapped negative side can leave i32; it saturates.
        i32::try_from(bounded).unwrap_or(i32::MIN)
    }
}

impl Default for RiskScale {
    fn default() -> Self {
        Self {
            max_score: DEFAULT_MAX_SCORE,
            floor_at_zero: false,
        }
    }
}

/// Risk percentage for `totals` against the default scale.
pub fn normalize(totals: &ScoreTotals) -> i32 {
    RiskScale::default().normalize(totals)
}

// Rounds numerator / denominator to the nearest integer, halves towards positive infinity.
fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RiskScaleFields {
    #[serde(default = "default_max_score")]
    max_score: i32,
    #[serde(default)]
    floor_at_zero: bool,
}

fn default_max_score() -> i32 {
    DEFAULT_MAX_SCORE
}

impl TryFrom<RiskScaleFields> for RiskScale {
    type Error = PolicyError;

    fn try_from(fields: RiskScaleFields) -> Result<Self, Self::Error> {
        Ok(RiskScale::new(fields.max_score)?.with_floor_at_zero(fields.floor_at_zero))
    }
}

impl From<RiskScale> for RiskScaleFields {
    fn from(scale: RiskScale) -> Self {
        Self {
            max_score: scale.max_score,
            floor_at_zero: scale.floor_at_zero,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals_summing_to(sum: i32) -> ScoreTotals {
        ScoreTotals::new(sum, 0, 0, 0)
    }

    #[test]
    fn forty_of_fifty_five_rounds_to_seventy_three() {
        let totals = ScoreTotals::new(10, 10, 10, 10);
        assert_eq!(normalize(&totals), 73);
    }

    #[test]
    fn caps_at_one_hundred() {
        assert_eq!(normalize(&totals_summing_to(55)), 100);
        assert_eq!(normalize(&totals_summing_to(80)), 100);
    }

    #[test]
    fn rounds_halves_up() {
        let scale = RiskScale::new(8).expect("positive max");
        assert_eq!(scale.normalize(&totals_summing_to(1)), 13);
        assert_eq!(scale.normalize(&totals_summing_to(-1)), -12);
    }

    #[test]
    fn monotonic_across_the_range() {
        let mut previous = normalize(&totals_summing_to(-10));
        for sum in -9..=70 {
            let current = normalize(&totals_summing_to(sum));
            assert!(current >= previous, "risk dropped at total {sum}");
            assert!(current <= RISK_CEILING);
            previous = current;
        }
    }

    #[test]
    fn negative_totals_pass_through_unless_floored() {
        let totals = totals_summing_to(-11);
        assert_eq!(normalize(&totals), -20);

        let floored = RiskScale::default().with_floor_at_zero(true);
        assert_eq!(floored.normalize(&totals), 0);
    }

    #[test]
    fn rejects_non_positive_maximum() {
        assert!(matches!(
            RiskScale::new(0),
            Err(PolicyError::InvalidMaxScore(0))
        ));
        let parsed: Result<RiskScale, _> = serde_json::from_str(r#"{"max_score": -5}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let scale: RiskScale = serde_json::from_str("{}").expect("defaults apply");
        assert_eq!(scale, RiskScale::default());
    }
}
