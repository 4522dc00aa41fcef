//! Failure predictor contract and the logistic stand-in model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::features::{FeatureVector, FEATURE_SCHEMA_V1};

/// A binary classifier answering failure probabilities for trades.
///
/// Implementations must validate the vector against the canonical schema
/// before inference and must surface failures as errors; a default
/// probability is never substituted.
pub trait FailurePredictor: Send + Sync {
    /// Predicts the probability that the described trade fails to settle.
    ///
    /// # Errors
    /// Returns [`PredictError::SchemaMismatch`] for a malformed vector,
    /// [`PredictError::Unavailable`] when the model cannot serve, and
    /// [`PredictError::InvalidProbability`] if the model output leaves
    /// [0, 1].
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, PredictError>;
}

/// Qualitative risk level derived from a failure probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Maps a probability to a risk level: above 0.7 is high, above 0.3
    /// is medium.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            RiskLevel::High
        } else if probability > 0.3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

/// On-disk model artifact: one coefficient per canonical feature plus an
/// intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelArtifact {
    schema_version: u16,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Logistic regression over the canonical feature vector.
///
/// Stands in for the externally trained model: the coefficients come from
/// an artifact file, not from this crate.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    /// Creates a model from explicit coefficients.
    ///
    /// # Errors
    /// Returns [`PredictError::SchemaMismatch`] if the coefficient count
    /// does not match the canonical schema.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, PredictError> {
        if coefficients.len() != FEATURE_SCHEMA_V1.fields.len() {
            return Err(PredictError::SchemaMismatch(format!(
                "model has {} coefficients, schema has {} features",
                coefficients.len(),
                FEATURE_SCHEMA_V1.fields.len()
            )));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// Loads a model artifact from a JSON file.
    ///
    /// # Errors
    /// Returns [`PredictError::Unavailable`] when the artifact cannot be
    /// read or parsed, and [`PredictError::SchemaMismatch`] when it was
    /// trained against a different schema version.
    pub fn from_json_file(path: &Path) -> Result<Self, PredictError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PredictError::Unavailable(format!("{}: {e}", path.display())))?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| PredictError::Unavailable(format!("{}: {e}", path.display())))?;

        if artifact.schema_version != FEATURE_SCHEMA_V1.version {
            return Err(PredictError::SchemaMismatch(format!(
                "artifact trained against schema version {}, expected {}",
                artifact.schema_version,
                FEATURE_SCHEMA_V1.version
            )));
        }

        Self::new(artifact.coefficients, artifact.intercept)
    }
}

impl FailurePredictor for LogisticModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        features.validate()?;

        let z: f64 = features
            .values()
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept;

        let probability = 1.0 / (1.0 + (-z).exp());
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PredictError::InvalidProbability(probability));
        }

        tracing::debug!(probability, "failure probability predicted");
        Ok(probability)
    }
}
