//! Risk bucketing.
//!
//! Maps a non-negative value-at-risk onto one of five ordered categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discrete risk category for a trade's value at risk.
///
/// Bucket edges are `[0, 1000, 5000, 10000, 50000, ∞)`, half-open on the
/// right: each boundary value belongs to the bucket above it, so a VaR of
/// exactly 1000 is `Low` and anything at or above 50000 is `VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBucket {
    #[serde(rename = "Very Low")]
    VeryLow,
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskBucket {
    /// All buckets in ascending risk order.
    pub const ALL: [RiskBucket; 5] = [
        RiskBucket::VeryLow,
        RiskBucket::Low,
        RiskBucket::Medium,
        RiskBucket::High,
        RiskBucket::VeryHigh,
    ];

    /// Assigns a bucket to a value at risk. Total over every non-negative
    /// input and monotonic in `var`.
    #[must_use]
    pub fn for_var(var: Decimal) -> Self {
        if var < Decimal::from(1000) {
            RiskBucket::VeryLow
        } else if var < Decimal::from(5000) {
            RiskBucket::Low
        } else if var < Decimal::from(10000) {
            RiskBucket::Medium
        } else if var < Decimal::from(50000) {
            RiskBucket::High
        } else {
            RiskBucket::VeryHigh
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBucket::VeryLow => "Very Low",
            RiskBucket::Low => "Low",
            RiskBucket::Medium => "Medium",
            RiskBucket::High => "High",
            RiskBucket::VeryHigh => "Very High",
        }
    }
}
