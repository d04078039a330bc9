//! # Validation Module
//!
//! Commit-time validation for bill drafts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Whole-draft rule validation                                       │
//! │  └── Collects EVERY failing field, never stops at the first            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persistence collaborator                                      │
//! │  └── Identity/uniqueness constraints (invoice numbers, ids)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{FieldError, LineItemIssue};
use crate::types::{BillDraft, ConversionInput};

// =============================================================================
// Draft Validation
// =============================================================================

/// Validates a draft for commit.
///
/// ## Rules
/// - buyer name must not be blank
/// - every line item needs a non-blank name, a positive rate and a
///   positive quantity
///
/// The whole line-item sequence is evaluated so all failing indices are
/// reported together.
///
/// ## Example
/// ```rust
/// use khata_core::types::BillDraft;
/// use khata_core::validation::validate_draft;
///
/// // A fresh draft fails: blank buyer, one blank zero-valued item.
/// let errors = validate_draft(&BillDraft::new()).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub fn validate_draft(draft: &BillDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if draft.buyer.client_name.trim().is_empty() {
        errors.push(FieldError::EmptyClientName);
    }

    for (index, item) in draft.line_items.iter().enumerate() {
        if let Some(reason) = line_item_issue(item) {
            errors.push(FieldError::InvalidLineItem { index, reason });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns the first problem with a line item, if any.
///
/// Reported in field order: name, then rate, then quantity.
fn line_item_issue(item: &crate::types::LineItem) -> Option<LineItemIssue> {
    if item.name.trim().is_empty() {
        return Some(LineItemIssue::BlankName);
    }
    if !item.rate.is_positive() {
        return Some(LineItemIssue::NonPositiveRate);
    }
    if !item.quantity.is_positive() {
        return Some(LineItemIssue::NonPositiveQuantity);
    }
    None
}

// =============================================================================
// Conversion Input Validation
// =============================================================================

/// Validates the input for a Kacha → Pakka conversion.
///
/// Returns the list of missing field names on failure, so the modal can
/// highlight each one. The GST slab is already constrained by the
/// `GstRate` type itself.
pub fn validate_conversion_input(input: &ConversionInput) -> Result<(), Vec<String>> {
    let mut missing = Vec::new();

    if input.client_address.trim().is_empty() {
        missing.push("client_address".to_string());
    }
    if input.client_gst.trim().is_empty() {
        missing.push("client_gst".to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
