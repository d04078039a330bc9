//! # Error Types
//!
//! Domain-specific error types for khata-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  khata-core errors (this file)                                          │
//! │  ├── BillError        - Lifecycle rule violations                       │
//! │  ├── FieldError       - One invalid draft field                         │
//! │  └── LineItemIssue    - What is wrong with a line item                  │
//! │                                                                         │
//! │  khata-engine errors (separate crate)                                   │
//! │  ├── StoreError       - Persistence collaborator failures               │
//! │  └── EngineError      - BillError | StoreError union                    │
//! │                                                                         │
//! │  Flow: FieldError → BillError → EngineError → caller/UI                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Every error is a returned value; the core never panics or throws
//! 4. Validation aggregates ALL failures, never just the first

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Line Item Issue
// =============================================================================

/// Why a specific line item failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineItemIssue {
    #[error("item name is blank")]
    BlankName,
    #[error("rate must be positive")]
    NonPositiveRate,
    #[error("quantity must be positive")]
    NonPositiveQuantity,
}

// =============================================================================
// Field Error
// =============================================================================

/// One invalid field on a draft.
///
/// Collected into a list so the UI can mark every failing field at once.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FieldError {
    /// Buyer name is blank.
    #[error("client name is required")]
    EmptyClientName,

    /// Line item at `index` is invalid for the given reason.
    #[error("line item {index}: {reason}")]
    InvalidLineItem { index: usize, reason: LineItemIssue },
}

// =============================================================================
// Bill Error
// =============================================================================

/// Bill lifecycle errors.
///
/// These are business rule violations surfaced as tagged results. The UI
/// layer translates the kind into toasts or inline messages; the core only
/// reports what happened.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum BillError {
    /// Mutation attempted before the business profile is complete.
    ///
    /// Checked before any other operation logic; the draft is untouched.
    #[error("complete business onboarding before editing bills")]
    OnboardingRequired,

    /// One or more draft fields are invalid at commit time.
    ///
    /// Always carries every failing field, evaluated over the whole
    /// line-item sequence without short-circuiting.
    #[error("draft validation failed: {0:?}")]
    ValidationFailed(Vec<FieldError>),

    /// Conversion attempted without the required address/GSTIN.
    #[error("conversion requires: {0:?}")]
    ConversionValidationFailed(Vec<String>),

    /// Conversion attempted on a bill that is already Pakka.
    #[error("bill is already a pakka invoice")]
    AlreadyConverted,
}

/// Convenience type alias for Results with BillError.
pub type BillResult<T> = Result<T, BillError>;

// =============================================================================
// Unit Tests
// =============================================================================
