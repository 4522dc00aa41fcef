//! Correlation analysis.
//!
//! Pearson pairwise correlation over derived trade attributes. Degenerate
//! inputs (fewer than two trades, constant series) produce `NaN` entries,
//! never an error.

use post_trade_data::TradeRecord;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Column labels of the correlation matrix, in matrix order.
pub const CORRELATION_COLUMNS: [&str; 6] = [
    "quantity",
    "price",
    "value_at_risk",
    "abs_quantity",
    "is_failed",
    "is_sell",
];

/// Symmetric pairwise correlation matrix with named columns.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Looks up the correlation between two named columns.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Correlations of every column against `is_failed`, descending.
    ///
    /// `NaN` entries sort last.
    #[must_use]
    pub fn failure_correlations(&self) -> Vec<(String, f64)> {
        let Some(failed_idx) = self.columns.iter().position(|c| c == "is_failed") else {
            return Vec::new();
        };

        let mut rows: Vec<(String, f64)> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != failed_idx)
            .map(|(i, name)| (name.clone(), self.values[i][failed_idx]))
            .collect();

        rows.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => b.1.total_cmp(&a.1),
        });
        rows
    }
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }

    #[allow(clippy::cast_precision_loss)]
    let len = n as f64;
    let mean_x: f64 = x.iter().sum::<f64>() / len;
    let mean_y: f64 = y.iter().sum::<f64>() / len;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

/// Pearson correlation over `quantity` (signed), `price`,
/// `value_at_risk`, `abs_quantity`, `is_failed` and `is_sell`.
#[must_use]
pub fn correlation_analysis(trades: &[TradeRecord]) -> CorrelationMatrix {
    let to_f64 = |d: rust_decimal::Decimal| d.to_f64().unwrap_or(f64::NAN);

    let series: [Vec<f64>; 6] = [
        trades.iter().map(|t| to_f64(t.signed_quantity())).collect(),
        trades.iter().map(|t| to_f64(t.price)).collect(),
        trades.iter().map(|t| to_f64(t.value_at_risk)).collect(),
        trades.iter().map(|t| to_f64(t.quantity)).collect(),
        trades
            .iter()
            .map(|t| if t.is_failed() { 1.0 } else { 0.0 })
            .collect(),
        trades
            .iter()
            .map(|t| if t.is_sell() { 1.0 } else { 0.0 })
            .collect(),
    ];

    let values = series
        .iter()
        .map(|x| series.iter().map(|y| pearson(x, y)).collect())
        .collect();

    CorrelationMatrix {
        columns: CORRELATION_COLUMNS.iter().map(ToString::to_string).collect(),
        values,
    }
}
