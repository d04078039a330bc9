//! # Engine Errors
//!
//! Error types for the orchestration layer. Domain rule violations stay
//! typed as [`khata_core::BillError`]; persistence failures arrive as
//! [`StoreError`] and pass through opaquely; the engine never interprets
//! or retries them.

use khata_core::BillError;
use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// A failure reported by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No bill with the given id.
    #[error("bill not found: {0}")]
    NotFound(String),

    /// Line-item mutation attempted on a Pakka bill.
    #[error("bill {0} is pakka and can no longer be edited")]
    ImmutableBill(String),

    /// Conversion rejected for missing required input fields.
    #[error("conversion input incomplete: {0:?}")]
    MissingConversionFields(Vec<String>),

    /// Opaque backend failure (network, storage, anything downstream).
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Engine Error
// =============================================================================

/// Everything a lifecycle operation can fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A bill lifecycle rule was violated (gate, validation, conversion).
    #[error(transparent)]
    Bill(#[from] BillError),

    /// The persistence collaborator failed; propagated, never retried here.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_messages() {
        assert_eq!(
            StoreError::NotFound("b-1".to_string()).to_string(),
            "bill not found: b-1"
        );
        assert_eq!(
            StoreError::ImmutableBill("b-2".to_string()).to_string(),
            "bill b-2 is pakka and can no longer be edited"
        );
    }

    #[test]
    fn test_bill_error_converts_to_engine_error() {
        let err: EngineError = BillError::AlreadyConverted.into();
        assert!(matches!(err, EngineError::Bill(BillError::AlreadyConverted)));
    }

    #[test]
    fn test_store_error_converts_to_engine_error() {
        let err: EngineError = StoreError::Backend("timeout".to_string()).into();
        assert!(matches!(err, EngineError::Store(_)));
    }
}
