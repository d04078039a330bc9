//! # Conversion Workflow
//!
//! The Kacha → Pakka transition. Exactly two states, one direction:
//!
//! ```text
//!   ┌─────────┐   convert(address, gst, rate)   ┌─────────┐
//!   │  Kacha  │ ───────────────────────────────► │  Pakka  │
//!   │ mutable │                                  │terminal │
//!   └─────────┘ ◄────────────── ✗ ────────────── └─────────┘
//!                      (no reverse path)
//! ```
//!
//! The transition validates its input up front and either applies the
//! full effect (class, buyer merge, rate, totals recompute) or leaves the
//! bill untouched. Converting a Pakka bill fails with `AlreadyConverted`
//! without recomputing anything.

use tracing::info;

use khata_core::totals::compute_totals;
use khata_core::types::{BillClass, ConversionInput, PersistedBill};
use khata_core::validation::validate_conversion_input;
use khata_core::{BillError, BillResult};

/// Applies the Kacha → Pakka transition to a bill.
///
/// ## Preconditions
/// - the bill is Kacha (else `AlreadyConverted`)
/// - the input carries a non-empty address and GSTIN (else
///   `ConversionValidationFailed` with the missing field names)
///
/// ## Effect
/// Returns a new bill: class Pakka, the input's address/GSTIN merged into
/// the buyer, the chosen GST slab, and totals recomputed under Pakka
/// rules so the tax becomes active. The input bill is never partially
/// mutated; on failure the caller's bill is exactly as it was.
pub fn convert(bill: &PersistedBill, input: &ConversionInput) -> BillResult<PersistedBill> {
    if bill.class == BillClass::Pakka {
        return Err(BillError::AlreadyConverted);
    }

    validate_conversion_input(input).map_err(BillError::ConversionValidationFailed)?;

    let mut converted = bill.clone();
    converted.class = BillClass::Pakka;
    converted.buyer.client_address = input.client_address.clone();
    converted.buyer.client_gst = input.client_gst.clone();
    converted.gst_rate = input.gst_rate;
    converted.totals = compute_totals(&converted.as_draft());

    info!(
        bill_id = %bill.id,
        gst_rate = converted.gst_rate.percent(),
        grand_total = %converted.totals.grand_total,
        "bill converted to pakka"
    );

    Ok(converted)
}

// =============================================================================
// Unit Tests
// =============================================================================
