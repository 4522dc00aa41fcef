use thiserror::Error;

/// Errors raised at the model boundary.
///
/// Deliberately distinct from the storage error type: an unreachable
/// model must never read as an unreachable database, and no caller gets a
/// silently substituted default probability.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The model artifact could not be loaded or reached.
    #[error("failure model unavailable: {0}")]
    Unavailable(String),

    /// The feature vector does not match the canonical schema.
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The model produced a value outside [0, 1].
    #[error("model returned invalid probability {0}")]
    InvalidProbability(f64),
}
