//! Client-side contract for the external trade failure model.
//!
//! The model itself is trained and served elsewhere; this crate owns the
//! canonical feature schema, validates every vector before inference, and
//! keeps prediction errors distinct from storage errors.

pub mod error;
pub mod features;
pub mod model;

pub use error::PredictError;
pub use features::{FeatureSchema, FeatureVector, PredictionInputs, FEATURE_SCHEMA_V1};
pub use model::{FailurePredictor, LogisticModel, RiskLevel};
