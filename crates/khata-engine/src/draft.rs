//! # Draft Session
//!
//! Mediates every mutation to a [`BillDraft`] and guarantees that the
//! totals a caller sees are always derivable from the current draft state
//! via [`compute_totals`].
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Draft Session Operations                            │
//! │                                                                         │
//! │  Frontend Action         Session Operation         Draft Change        │
//! │  ───────────────         ─────────────────         ────────────        │
//! │                                                                         │
//! │  Edit buyer field ──────► update_buyer() ─────────► buyer merge        │
//! │                                                                         │
//! │  Edit item row ─────────► update_line_item() ─────► items[i] merge     │
//! │                                                                         │
//! │  Click "+ item" ────────► add_line_item() ────────► items.push(blank)  │
//! │                                                                         │
//! │  Click remove ──────────► remove_line_item() ─────► items.remove(i)    │
//! │                                                      (never the last)   │
//! │                                                                         │
//! │  Any keystroke ─────────► totals() ───────────────► (read only)        │
//! │                                                                         │
//! │  EVERY mutating operation checks the onboarding gate FIRST.            │
//! │  Gate closed ⇒ OnboardingRequired, draft untouched.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Each operation either applies its full set of field changes or nothing:
//! all checks run before the first field is written, so a failed call
//! never leaves a partially-updated draft behind.

use std::sync::Arc;

use tracing::debug;

use khata_core::totals::{compute_totals, TotalsSummary};
use khata_core::types::{BillClass, BillDraft, BuyerPatch, GstRate, LineItem, LineItemPatch};
use khata_core::validation::validate_draft;
use khata_core::{BillError, BillResult, Money};

// =============================================================================
// Onboarding Gate
// =============================================================================

/// The externally supplied onboarding capability.
///
/// The identity collaborator owns the flag; the session only consults it.
/// It is injected rather than read from ambient global state so tests and
/// embedders control it explicitly.
pub trait OnboardingGate: Send + Sync {
    /// Whether the business profile is complete enough to edit bills.
    fn is_onboarded(&self) -> bool;
}

/// A fixed-value gate, handy for tests and single-user embedding.
#[derive(Debug, Clone, Copy)]
pub struct StaticGate(pub bool);

impl OnboardingGate for StaticGate {
    fn is_onboarded(&self) -> bool {
        self.0
    }
}

// =============================================================================
// Draft Session
// =============================================================================

/// Exclusive owner of one bill draft's in-memory mutation.
///
/// One editing session at a time per draft; there is no merge or conflict
/// resolution at this layer.
pub struct DraftSession {
    draft: BillDraft,
    gate: Arc<dyn OnboardingGate>,
}

impl DraftSession {
    /// Starts a session on a fresh empty draft (one blank line item).
    pub fn new(gate: Arc<dyn OnboardingGate>) -> Self {
        DraftSession {
            draft: BillDraft::new(),
            gate,
        }
    }

    /// Starts a session on an existing draft (editing a saved Kacha bill).
    pub fn from_draft(draft: BillDraft, gate: Arc<dyn OnboardingGate>) -> Self {
        DraftSession { draft, gate }
    }

    /// Read-only view of the current draft.
    pub fn draft(&self) -> &BillDraft {
        &self.draft
    }

    /// Consumes the session, yielding the draft for commit.
    pub fn into_draft(self) -> BillDraft {
        self.draft
    }

    /// Checked before any other logic in every mutating operation.
    fn check_gate(&self) -> BillResult<()> {
        if self.gate.is_onboarded() {
            Ok(())
        } else {
            debug!("mutation rejected: onboarding incomplete");
            Err(BillError::OnboardingRequired)
        }
    }

    // -------------------------------------------------------------------------
    // Mutating operations
    // -------------------------------------------------------------------------

    /// Merges partial buyer fields into the draft.
    pub fn update_buyer(&mut self, patch: BuyerPatch) -> BillResult<()> {
        self.check_gate()?;
        self.draft.buyer.apply(patch);
        Ok(())
    }

    /// Merges partial fields into the line item at `index`.
    ///
    /// An out-of-bounds index is a no-op, not an error: the row the user
    /// was editing may already have been removed.
    pub fn update_line_item(&mut self, index: usize, patch: LineItemPatch) -> BillResult<()> {
        self.check_gate()?;
        if let Some(item) = self.draft.line_items.get_mut(index) {
            item.apply(patch);
        }
        Ok(())
    }

    /// Appends a zero-valued line item.
    pub fn add_line_item(&mut self) -> BillResult<()> {
        self.check_gate()?;
        self.draft.line_items.push(LineItem::default());
        debug!(items = self.draft.line_items.len(), "line item added");
        Ok(())
    }

    /// Removes the line item at `index`.
    ///
    /// A draft always retains at least one line item; removing the only
    /// remaining item (or an out-of-bounds index) is a no-op.
    pub fn remove_line_item(&mut self, index: usize) -> BillResult<()> {
        self.check_gate()?;
        if self.draft.line_items.len() > 1 && index < self.draft.line_items.len() {
            self.draft.line_items.remove(index);
        }
        Ok(())
    }

    /// Sets the flat discount amount, clamped non-negative.
    pub fn set_discount(&mut self, amount: Money) -> BillResult<()> {
        self.check_gate()?;
        self.draft.discount = amount.clamp_non_negative();
        Ok(())
    }

    /// Sets the free-text notes.
    pub fn set_notes(&mut self, text: &str) -> BillResult<()> {
        self.check_gate()?;
        self.draft.notes = text.to_string();
        Ok(())
    }

    /// Sets the GST slab.
    ///
    /// Only meaningful on a Pakka draft; on a Kacha draft the call is
    /// ignored (Ok, no mutation), since Kacha tax is always zero anyway.
    pub fn set_gst_rate(&mut self, rate: GstRate) -> BillResult<()> {
        self.check_gate()?;
        if self.draft.class == BillClass::Pakka {
            self.draft.gst_rate = rate;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Read-only operations
    // -------------------------------------------------------------------------

    /// Live totals preview.
    ///
    /// Recomputed on every call through the same [`compute_totals`] the
    /// commit path uses; there is no caching to invalidate.
    pub fn totals(&self) -> TotalsSummary {
        compute_totals(&self.draft)
    }

    /// Validates the draft for commit, aggregating every failing field.
    pub fn validate(&self) -> BillResult<()> {
        validate_draft(&self.draft).map_err(BillError::ValidationFailed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
