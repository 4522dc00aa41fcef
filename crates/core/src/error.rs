//! Shared error types for the storage boundary.
//!
//! Storage failures are fatal to an analysis run; they are kept distinct
//! from prediction-side errors so callers can never confuse an unreachable
//! database with an unreachable model.

use thiserror::Error;

/// Errors raised by the trade record store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("trade store unavailable: {0}")]
    Unavailable(String),

    /// The store was reachable but a query failed.
    #[error("trade store query failed: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Unavailable("connection refused".to_string());
        assert!(err.to_string().contains("unavailable"));

        let err = StoreError::Query("relation does not exist".to_string());
        assert!(err.to_string().contains("query failed"));
    }
}
