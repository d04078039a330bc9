//! # Totals Computation Engine
//!
//! The single place bill totals are computed.
//!
//! ## One Function, Two Call Sites
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     compute_totals(draft)                               │
//! │                                                                         │
//! │   Live preview (every keystroke)          Commit / conversion          │
//! │            │                                      │                     │
//! │            └──────────────┬───────────────────────┘                     │
//! │                           ▼                                             │
//! │                  subtotal = Σ rate × qty                                │
//! │                  base     = max(0, subtotal − discount)                 │
//! │                  tax      = Pakka ? base × rate : 0                     │
//! │                  total    = max(0, subtotal − discount + tax)           │
//! │                                                                         │
//! │   Both paths run EXACTLY this code, so the preview a user sees and     │
//! │   the snapshot the store persists can never diverge.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totality
//! `compute_totals` never fails. Malformed numeric input degrades to a
//! zero contribution; oversized discounts clamp rather than produce a
//! negative total.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{BillDraft, GstRate};

// =============================================================================
// Totals Summary
// =============================================================================

/// The numeric summary of a bill draft.
///
/// Persisted as the `totals` snapshot on a saved bill and consumed
/// read-only by preview/PDF/chart layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TotalsSummary {
    /// Sum of all line amounts before discount and tax.
    pub subtotal: Money,
    /// Flat discount applied (clamped non-negative).
    pub discount: Money,
    /// GST on the post-discount base. Always zero for Kacha.
    pub tax: Money,
    /// `max(0, subtotal − discount + tax)`.
    pub grand_total: Money,
    /// The discount expressed as a percentage of the subtotal.
    /// Informational only; the discount is never re-derived from it.
    pub discount_percent_equivalent: f64,
}

impl TotalsSummary {
    /// An all-zero summary (empty draft, nothing billed).
    pub fn zero() -> Self {
        TotalsSummary {
            subtotal: Money::zero(),
            discount: Money::zero(),
            tax: Money::zero(),
            grand_total: Money::zero(),
            discount_percent_equivalent: 0.0,
        }
    }
}

impl Default for TotalsSummary {
    fn default() -> Self {
        TotalsSummary::zero()
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Computes the totals summary for a draft.
///
/// Pure and deterministic: same draft in, same summary out, no hidden
/// state. Call it as often as you like.
///
/// ## Rules
/// - line items with a negative rate or quantity contribute zero
/// - the discount is a flat amount, clamped non-negative
/// - tax applies to the post-discount base, never the raw subtotal
/// - a Kacha draft's tax is zero whatever `gst_rate` it carries
/// - the grand total never goes below zero, however large the discount
///
/// ## Example
/// ```rust
/// use khata_core::money::{Money, Quantity};
/// use khata_core::totals::compute_totals;
/// use khata_core::types::{BillClass, BillDraft, GstRate, LineItem};
///
/// let mut draft = BillDraft::new();
/// draft.class = BillClass::Pakka;
/// draft.gst_rate = GstRate::Eighteen;
/// draft.line_items = vec![
///     LineItem { name: "A".into(), rate: Money::from_rupees(100), quantity: Quantity::new(2) },
///     LineItem { name: "B".into(), rate: Money::from_rupees(50), quantity: Quantity::new(1) },
/// ];
/// draft.discount = Money::from_rupees(20);
///
/// let totals = compute_totals(&draft);
/// assert_eq!(totals.subtotal, Money::from_rupees(250));
/// assert_eq!(totals.tax, Money::from_paise(4140));        // 18% of ₹230
/// assert_eq!(totals.grand_total, Money::from_paise(27140)); // ₹271.40
/// ```
pub fn compute_totals(draft: &BillDraft) -> TotalsSummary {
    let subtotal: Money = draft
        .line_items
        .iter()
        .fold(Money::zero(), |acc, item| acc + item.amount());

    let discount = draft.discount.clamp_non_negative();

    // Tax applies to the post-discount base; the base clamps at zero so
    // an oversized discount can never produce negative tax.
    let base = (subtotal - discount).clamp_non_negative();
    let tax = match draft.effective_gst_rate() {
        GstRate::Zero => Money::zero(),
        rate => base.gst(rate),
    };

    let grand_total = (subtotal - discount + tax).clamp_non_negative();

    let discount_percent_equivalent = if subtotal.is_positive() {
        discount.paise() as f64 / subtotal.paise() as f64 * 100.0
    } else {
        0.0
    };

    TotalsSummary {
        subtotal,
        discount,
        tax,
        grand_total,
        discount_percent_equivalent,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Quantity;
    use crate::types::{BillClass, LineItem};

    fn item(rate_rupees: i64, qty: i64) -> LineItem {
        LineItem {
            name: "Item".to_string(),
            rate: Money::from_rupees(rate_rupees),
            quantity: Quantity::new(qty),
        }
    }

    /// Line items [{100, 2}, {50, 1}], discount ₹20, Pakka at 18%:
    /// subtotal 250, base 230, tax 41.40, grand total 271.40.
    #[test]
    fn test_pakka_totals_with_discount_and_gst() {
        let mut draft = BillDraft::new();
        draft.class = BillClass::Pakka;
        draft.gst_rate = GstRate::Eighteen;
        draft.line_items = vec![item(100, 2), item(50, 1)];
        draft.discount = Money::from_rupees(20);

        let totals = compute_totals(&draft);
        assert_eq!(totals.subtotal, Money::from_rupees(250));
        assert_eq!(totals.discount, Money::from_rupees(20));
        assert_eq!(totals.tax, Money::from_paise(4140));
        assert_eq!(totals.grand_total, Money::from_paise(27140));
        assert!((totals.discount_percent_equivalent - 8.0).abs() < 1e-9);
    }

    /// Same items, discount ₹1000 (exceeds subtotal), Kacha:
    /// subtotal 250, tax 0, grand total clamps to 0 (not −750).
    #[test]
    fn test_oversized_discount_clamps_to_zero() {
        let mut draft = BillDraft::new();
        draft.line_items = vec![item(100, 2), item(50, 1)];
        draft.discount = Money::from_rupees(1000);

        let totals = compute_totals(&draft);
        assert_eq!(totals.subtotal, Money::from_rupees(250));
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.grand_total, Money::zero());
    }

    #[test]
    fn test_kacha_ignores_stored_gst_rate() {
        let mut draft = BillDraft::new();
        draft.line_items = vec![item(100, 1)];
        draft.gst_rate = GstRate::TwentyEight; // present but inert

        let totals = compute_totals(&draft);
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.grand_total, Money::from_rupees(100));
    }

    #[test]
    fn test_empty_line_items_all_zero() {
        let mut draft = BillDraft::new();
        draft.line_items.clear();

        assert_eq!(compute_totals(&draft), TotalsSummary::zero());
    }

    #[test]
    fn test_negative_inputs_contribute_zero() {
        let mut draft = BillDraft::new();
        draft.line_items = vec![
            item(100, 1),
            LineItem {
                name: "Bad".to_string(),
                rate: Money::from_paise(-500),
                quantity: Quantity::new(3),
            },
            LineItem {
                name: "Worse".to_string(),
                rate: Money::from_rupees(10),
                quantity: Quantity::new(-1),
            },
        ];

        let totals = compute_totals(&draft);
        assert_eq!(totals.subtotal, Money::from_rupees(100));
    }

    #[test]
    fn test_negative_discount_clamps() {
        let mut draft = BillDraft::new();
        draft.line_items = vec![item(100, 1)];
        draft.discount = Money::from_paise(-500);

        let totals = compute_totals(&draft);
        assert_eq!(totals.discount, Money::zero());
        assert_eq!(totals.grand_total, Money::from_rupees(100));
    }

    #[test]
    fn test_pakka_tax_never_negative_on_oversized_discount() {
        let mut draft = BillDraft::new();
        draft.class = BillClass::Pakka;
        draft.gst_rate = GstRate::Eighteen;
        draft.line_items = vec![item(100, 1)];
        draft.discount = Money::from_rupees(500);

        let totals = compute_totals(&draft);
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.grand_total, Money::zero());
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let mut draft = BillDraft::new();
        draft.class = BillClass::Pakka;
        draft.gst_rate = GstRate::Twelve;
        draft.line_items = vec![item(99, 3), item(7, 11)];
        draft.discount = Money::from_rupees(13);

        let first = compute_totals(&draft);
        let second = compute_totals(&draft);
        assert_eq!(first, second);
    }

    #[test]
    fn test_discount_percent_zero_when_subtotal_zero() {
        let mut draft = BillDraft::new();
        draft.discount = Money::from_rupees(50);

        let totals = compute_totals(&draft);
        assert_eq!(totals.discount_percent_equivalent, 0.0);
        assert_eq!(totals.grand_total, Money::zero());
    }
}
