//! Canonical feature schema for failure prediction.
//!
//! The model was historically called with two different, mutually
//! inconsistent feature layouts. There is exactly one canonical layout
//! now, versioned, and every vector is validated against it before any
//! inference call.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PredictError;

/// A versioned, fixed-order feature layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema {
    pub version: u16,
    pub fields: &'static [&'static str],
}

/// Version 1 of the canonical schema. Field order is the wire contract.
pub const FEATURE_SCHEMA_V1: FeatureSchema = FeatureSchema {
    version: 1,
    fields: &[
        "quantity",
        "abs_quantity",
        "price",
        "notional",
        "trade_hour",
        "trade_day_of_week",
        "is_margin_trade",
        "is_sell_order",
    ],
};

// Field positions within FEATURE_SCHEMA_V1.
const IDX_QUANTITY: usize = 0;
const IDX_ABS_QUANTITY: usize = 1;
const IDX_PRICE: usize = 2;
const IDX_NOTIONAL: usize = 3;
const IDX_TRADE_HOUR: usize = 4;
const IDX_DAY_OF_WEEK: usize = 5;
const IDX_IS_MARGIN: usize = 6;
const IDX_IS_SELL: usize = 7;

/// Raw inputs a caller knows about a (prospective) trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionInputs {
    /// Positive share count; the sign is derived from `is_sell_order`.
    pub quantity: Decimal,
    pub price: Decimal,
    /// Hour of day, 0–23.
    pub trade_hour: u32,
    /// Day of week, 0 = Monday .. 6 = Sunday.
    pub trade_day_of_week: u32,
    pub is_margin_trade: bool,
    pub is_sell_order: bool,
}

/// A feature vector laid out per [`FEATURE_SCHEMA_V1`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    version: u16,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Assembles a vector from raw inputs in canonical field order.
    #[must_use]
    pub fn from_inputs(inputs: &PredictionInputs) -> Self {
        let abs_quantity = inputs.quantity.abs().to_f64().unwrap_or(0.0);
        let signed_quantity = if inputs.is_sell_order {
            -abs_quantity
        } else {
            abs_quantity
        };
        let price = inputs.price.to_f64().unwrap_or(0.0);

        Self {
            version: FEATURE_SCHEMA_V1.version,
            values: vec![
                signed_quantity,
                abs_quantity,
                price,
                abs_quantity * price,
                f64::from(inputs.trade_hour),
                f64::from(inputs.trade_day_of_week),
                if inputs.is_margin_trade { 1.0 } else { 0.0 },
                if inputs.is_sell_order { 1.0 } else { 0.0 },
            ],
        }
    }

    /// Schema version this vector claims to follow.
    #[must_use]
    pub fn version(&self) -> u16 {
        self.version
    }

    /// The raw values in schema order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Validates length, version, and per-field ranges against the
    /// canonical schema, plus the cross-field identities that catch
    /// reordered columns.
    ///
    /// # Errors
    /// Returns [`PredictError::SchemaMismatch`] describing the first
    /// violation found.
    pub fn validate(&self) -> Result<(), PredictError> {
        let schema = FEATURE_SCHEMA_V1;
        if self.version != schema.version {
            return Err(PredictError::SchemaMismatch(format!(
                "expected schema version {}, got {}",
                schema.version, self.version
            )));
        }
        if self.values.len() != schema.fields.len() {
            return Err(PredictError::SchemaMismatch(format!(
                "expected {} features, got {}",
                schema.fields.len(),
                self.values.len()
            )));
        }

        let hour = self.values[IDX_TRADE_HOUR];
        if hour.fract() != 0.0 || !(0.0..=23.0).contains(&hour) {
            return Err(PredictError::SchemaMismatch(format!(
                "trade_hour out of range: {hour}"
            )));
        }

        let dow = self.values[IDX_DAY_OF_WEEK];
        if dow.fract() != 0.0 || !(0.0..=6.0).contains(&dow) {
            return Err(PredictError::SchemaMismatch(format!(
                "trade_day_of_week out of range: {dow}"
            )));
        }

        for idx in [IDX_IS_MARGIN, IDX_IS_SELL] {
            let flag = self.values[idx];
            if flag != 0.0 && flag != 1.0 {
                return Err(PredictError::SchemaMismatch(format!(
                    "{} must be 0 or 1, got {flag}",
                    FEATURE_SCHEMA_V1.fields[idx]
                )));
            }
        }

        let quantity = self.values[IDX_QUANTITY];
        let abs_quantity = self.values[IDX_ABS_QUANTITY];
        if abs_quantity != quantity.abs() {
            return Err(PredictError::SchemaMismatch(format!(
                "abs_quantity {abs_quantity} is not |quantity| of {quantity}"
            )));
        }

        let notional = self.values[IDX_NOTIONAL];
        let expected = abs_quantity * self.values[IDX_PRICE];
        if (notional - expected).abs() > expected.abs().max(1.0) * 1e-9 {
            return Err(PredictError::SchemaMismatch(format!(
                "notional {notional} does not match quantity * price {expected}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_inputs() -> PredictionInputs {
        PredictionInputs {
            quantity: dec!(100),
            price: dec!(150.50),
            trade_hour: 14,
            trade_day_of_week: 2,
            is_margin_trade: true,
            is_sell_order: false,
        }
    }

    #[test]
    fn test_from_inputs_layout() {
        let vector = FeatureVector::from_inputs(&sample_inputs());
        let values = vector.values();

        assert_eq!(values.len(), FEATURE_SCHEMA_V1.fields.len());
        assert_eq!(values[0], 100.0); // quantity (buy: positive)
        assert_eq!(values[1], 100.0); // abs_quantity
        assert_eq!(values[2], 150.50);
        assert_eq!(values[3], 15050.0); // notional
        assert_eq!(values[4], 14.0);
        assert_eq!(values[5], 2.0);
        assert_eq!(values[6], 1.0);
        assert_eq!(values[7], 0.0);
    }

    #[test]
    fn test_sell_order_negates_quantity() {
        let mut inputs = sample_inputs();
        inputs.is_sell_order = true;

        let values = FeatureVector::from_inputs(&inputs).values().to_vec();
        assert_eq!(values[0], -100.0);
        assert_eq!(values[1], 100.0);
        assert_eq!(values[7], 1.0);
    }

    #[test]
    fn test_assembled_vector_validates() {
        assert!(FeatureVector::from_inputs(&sample_inputs())
            .validate()
            .is_ok());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let vector = FeatureVector {
            version: 1,
            values: vec![100.0, 150.0, 9.0, 0.0, 1.0],
        };
        let err = vector.validate().unwrap_err();
        assert!(matches!(err, PredictError::SchemaMismatch(_)));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let mut vector = FeatureVector::from_inputs(&sample_inputs());
        vector.version = 2;
        assert!(vector.validate().is_err());
    }

    #[test]
    fn test_out_of_range_hour_rejected() {
        let mut vector = FeatureVector::from_inputs(&sample_inputs());
        vector.values[IDX_TRADE_HOUR] = 24.0;
        assert!(vector.validate().is_err());
    }

    #[test]
    fn test_swapped_columns_rejected() {
        // Swapping price and hour breaks both the hour range and the
        // notional identity.
        let mut vector = FeatureVector::from_inputs(&sample_inputs());
        vector.values.swap(IDX_PRICE, IDX_TRADE_HOUR);
        assert!(vector.validate().is_err());
    }

    #[test]
    fn test_inconsistent_abs_quantity_rejected() {
        let mut vector = FeatureVector::from_inputs(&sample_inputs());
        vector.values[IDX_ABS_QUANTITY] = 99.0;
        assert!(vector.validate().is_err());
    }

    #[test]
    fn test_non_binary_flag_rejected() {
        let mut vector = FeatureVector::from_inputs(&sample_inputs());
        vector.values[IDX_IS_SELL] = 0.5;
        assert!(vector.validate().is_err());
    }
}
