//! Rubric scoring model.
//!
//! # Responsibility
//! - Define the six fixed scoring dimensions and their caps.
//! - Provide the score record persisted inside drafts.
//!
//! # Invariants
//! - Dimension caps sum to [`RUBRIC_TOTAL_MAX`] (100).
//! - The record itself accepts any value; caps are enforced only at the
//!   input seam via [`RubricScores::set_clamped`].

use serde::{Deserialize, Serialize};

/// Maximum achievable total across all six dimensions.
pub const RUBRIC_TOTAL_MAX: u32 = 100;

/// One of the six fixed, independently-capped scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RubricDimension {
    Innovation,
    MarketTraction,
    Impact,
    FinancialHealth,
    Inclusion,
    Scalability,
}

impl RubricDimension {
    /// All dimensions in display order.
    pub const ALL: [Self; 6] = [
        Self::Innovation,
        Self::MarketTraction,
        Self::Impact,
        Self::FinancialHealth,
        Self::Inclusion,
        Self::Scalability,
    ];

    /// Upper slider bound for this dimension.
    pub fn max(self) -> u8 {
        match self {
            Self::Innovation | Self::MarketTraction => 20,
            Self::Impact => 25,
            Self::FinancialHealth => 15,
            Self::Inclusion | Self::Scalability => 10,
        }
    }

    /// Stable wire/display name (`marketTraction`-style).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Innovation => "innovation",
            Self::MarketTraction => "marketTraction",
            Self::Impact => "impact",
            Self::FinancialHealth => "financialHealth",
            Self::Inclusion => "inclusion",
            Self::Scalability => "scalability",
        }
    }
}

/// Fixed record of the six named rubric values.
///
/// Serialized as `{"innovation": ..., "marketTraction": ..., ...}` to match
/// the schema the portal and remote service exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricScores {
    pub innovation: u8,
    pub market_traction: u8,
    pub impact: u8,
    pub financial_health: u8,
    pub inclusion: u8,
    pub scalability: u8,
}

impl RubricScores {
    /// Sum of all six dimension values.
    pub fn total(&self) -> u32 {
        [
            self.innovation,
            self.market_traction,
            self.impact,
            self.financial_health,
            self.inclusion,
            self.scalability,
        ]
        .iter()
        .map(|value| u32::from(*value))
        .sum()
    }

    /// Returns the value stored for one dimension.
    pub fn get(&self, dimension: RubricDimension) -> u8 {
        match dimension {
            RubricDimension::Innovation => self.innovation,
            RubricDimension::MarketTraction => self.market_traction,
            RubricDimension::Impact => self.impact,
            RubricDimension::FinancialHealth => self.financial_health,
            RubricDimension::Inclusion => self.inclusion,
            RubricDimension::Scalability => self.scalability,
        }
    }

    /// Writes one dimension without bound checks.
    ///
    /// The draft store accepts any numeric record; clamping belongs to the
    /// input seam, not persistence.
    pub fn set(&mut self, dimension: RubricDimension, value: u8) {
        match dimension {
            RubricDimension::Innovation => self.innovation = value,
            RubricDimension::MarketTraction => self.market_traction = value,
            RubricDimension::Impact => self.impact = value,
            RubricDimension::FinancialHealth => self.financial_health = value,
            RubricDimension::Inclusion => self.inclusion = value,
            RubricDimension::Scalability => self.scalability = value,
        }
    }

    /// Writes one dimension clamped to its cap and returns the applied value.
    pub fn set_clamped(&mut self, dimension: RubricDimension, value: u8) -> u8 {
        let applied = value.min(dimension.max());
        self.set(dimension, applied);
        applied
    }

    /// Returns whether every dimension is within its cap.
    pub fn is_within_caps(&self) -> bool {
        RubricDimension::ALL
            .iter()
            .all(|dimension| self.get(*dimension) <= dimension.max())
    }
}

#[cfg(test)]
mod tests {
    use super::{RubricDimension, RubricScores, RUBRIC_TOTAL_MAX};

    #[test]
    fn dimension_caps_sum_to_total_max() {
        let sum: u32 = RubricDimension::ALL
            .iter()
            .map(|dimension| u32::from(dimension.max()))
            .sum();
        assert_eq!(sum, RUBRIC_TOTAL_MAX);
    }

    #[test]
    fn set_clamped_caps_at_dimension_max() {
        let mut scores = RubricScores::default();
        let applied = scores.set_clamped(RubricDimension::Inclusion, 99);
        assert_eq!(applied, 10);
        assert_eq!(scores.inclusion, 10);
        assert!(scores.is_within_caps());
    }

    #[test]
    fn set_accepts_values_beyond_caps() {
        let mut scores = RubricScores::default();
        scores.set(RubricDimension::Impact, 200);
        assert_eq!(scores.impact, 200);
        assert!(!scores.is_within_caps());
    }
}
