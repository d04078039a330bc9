//! # Domain Types
//!
//! Core domain types used throughout Khata.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    BillDraft    │   │  PersistedBill  │   │     Buyer       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  class          │   │  id (opaque)    │   │  client_name    │       │
//! │  │  buyer          │   │  invoice_number │   │  client_address │       │
//! │  │  line_items     │   │  created_at     │   │  client_gst     │       │
//! │  │  discount       │   │  totals snapshot│   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    GstRate      │   │   BillClass     │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Zero..Twenty-  │   │  Kacha (draft)  │   │  name           │       │
//! │  │  Eight          │   │  Pakka (final)  │   │  rate, quantity │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! A `BillDraft` is created with one blank line item, mutated through the
//! engine's draft session, committed once, and may later cross the one-way
//! Kacha → Pakka door. The persistence collaborator owns all identity
//! fields on `PersistedBill`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Quantity};
use crate::totals::TotalsSummary;

// =============================================================================
// Bill Class
// =============================================================================

/// The class of a bill.
///
/// A Kacha bill is provisional: mutable, never tax-bearing. A Pakka bill is
/// a finalized GST invoice. The transition Kacha → Pakka happens exactly
/// once and is never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BillClass {
    /// Provisional/proforma bill (mutable, effective GST is always zero).
    Kacha,
    /// Finalized GST invoice (immutable class, tax active).
    Pakka,
}

impl Default for BillClass {
    fn default() -> Self {
        BillClass::Kacha
    }
}

// =============================================================================
// GST Rate
// =============================================================================

/// GST slab, restricted to the enumerated rate set.
///
/// Rates are not arbitrary percentages: only the statutory slabs exist.
/// Internally everything converts to basis points for integer tax math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GstRate {
    Zero,
    Five,
    Twelve,
    Eighteen,
    TwentyEight,
}

impl GstRate {
    /// Every valid slab, in ascending order.
    pub const ALL: [GstRate; 5] = [
        GstRate::Zero,
        GstRate::Five,
        GstRate::Twelve,
        GstRate::Eighteen,
        GstRate::TwentyEight,
    ];

    /// Returns the rate in basis points (1800 = 18%).
    #[inline]
    pub const fn bps(&self) -> u32 {
        match self {
            GstRate::Zero => 0,
            GstRate::Five => 500,
            GstRate::Twelve => 1200,
            GstRate::Eighteen => 1800,
            GstRate::TwentyEight => 2800,
        }
    }

    /// Returns the rate as a whole percentage (for display only).
    #[inline]
    pub const fn percent(&self) -> u32 {
        self.bps() / 100
    }

    /// Looks up a slab from a whole percentage.
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::types::GstRate;
    ///
    /// assert_eq!(GstRate::from_percent(18), Some(GstRate::Eighteen));
    /// assert_eq!(GstRate::from_percent(15), None);
    /// ```
    pub const fn from_percent(percent: u32) -> Option<GstRate> {
        match percent {
            0 => Some(GstRate::Zero),
            5 => Some(GstRate::Five),
            12 => Some(GstRate::Twelve),
            18 => Some(GstRate::Eighteen),
            28 => Some(GstRate::TwentyEight),
            _ => None,
        }
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.bps() == 0
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::Zero
    }
}

// =============================================================================
// Buyer
// =============================================================================

/// The party a bill is raised against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Buyer {
    /// Client name (required for any commit).
    pub client_name: String,
    /// Billing address (required once the bill is Pakka).
    pub client_address: String,
    /// GSTIN (required once the bill is Pakka).
    pub client_gst: String,
}

/// Partial buyer update, merged field by field.
///
/// Only the fields present are applied; unknown keys cannot enter the
/// draft because the schema is closed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BuyerPatch {
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub client_gst: Option<String>,
}

impl Buyer {
    /// Merges a partial update into this buyer.
    pub fn apply(&mut self, patch: BuyerPatch) {
        if let Some(name) = patch.client_name {
            self.client_name = name;
        }
        if let Some(address) = patch.client_address {
            self.client_address = address;
        }
        if let Some(gst) = patch.client_gst {
            self.client_gst = gst;
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A single line on a bill.
///
/// The amount is never stored: it is always recomputed from rate and
/// quantity, so a stale or tampered amount can never reach the totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Item description (non-empty on commit).
    pub name: String,
    /// Unit rate.
    pub rate: Money,
    /// Units billed (positive on commit).
    pub quantity: Quantity,
}

impl LineItem {
    /// Derived line amount: `rate × quantity`.
    ///
    /// A negative rate or quantity contributes zero, matching the totals
    /// engine's degrade-never-throw rule.
    pub fn amount(&self) -> Money {
        if self.rate.is_negative() || self.quantity.get() < 0 {
            return Money::zero();
        }
        self.rate * self.quantity
    }
}

/// Partial line-item update, merged field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemPatch {
    pub name: Option<String>,
    pub rate: Option<Money>,
    pub quantity: Option<Quantity>,
}

impl LineItem {
    /// Merges a partial update into this line item.
    pub fn apply(&mut self, patch: LineItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
    }
}

// =============================================================================
// Bill Draft
// =============================================================================

/// The in-memory, not-yet-persisted editable form of a bill.
///
/// ## Invariants
/// - `line_items` always holds at least one entry (a draft starts with one
///   blank item; removing the last item is a no-op)
/// - `discount` is a flat amount, never a percentage
/// - the stored `gst_rate` only takes effect when `class` is Pakka; a
///   Kacha draft's effective tax is always zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillDraft {
    pub class: BillClass,
    pub buyer: Buyer,
    /// Insertion order is display order.
    pub line_items: Vec<LineItem>,
    /// Flat discount amount off the subtotal.
    pub discount: Money,
    /// GST slab; only meaningful when `class` is Pakka.
    pub gst_rate: GstRate,
    pub notes: String,
}

impl BillDraft {
    /// Creates an empty Kacha draft with one blank line item.
    pub fn new() -> Self {
        BillDraft {
            class: BillClass::Kacha,
            buyer: Buyer::default(),
            line_items: vec![LineItem::default()],
            discount: Money::zero(),
            gst_rate: GstRate::Zero,
            notes: String::new(),
        }
    }

    /// The rate totals math actually applies.
    ///
    /// Recomputed defensively: whatever `gst_rate` a Kacha draft carries,
    /// its effective rate is zero.
    pub fn effective_gst_rate(&self) -> GstRate {
        match self.class {
            BillClass::Kacha => GstRate::Zero,
            BillClass::Pakka => self.gst_rate,
        }
    }
}

impl Default for BillDraft {
    fn default() -> Self {
        BillDraft::new()
    }
}

// =============================================================================
// Persisted Bill
// =============================================================================

/// A bill as returned by the persistence collaborator.
///
/// Identity fields (`id`, `invoice_number`, `created_at`, `status`) are
/// owned by the store and never assigned client-side. The `totals`
/// snapshot is captured at the moment of last save and is the source of
/// truth for historical display; recomputation happens only on explicit
/// edit or conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersistedBill {
    /// Opaque, server-assigned identifier.
    pub id: String,
    /// Globally unique invoice number, assigned at persistence time.
    pub invoice_number: Option<String>,
    pub class: BillClass,
    pub buyer: Buyer,
    pub line_items: Vec<LineItem>,
    pub discount: Money,
    pub gst_rate: GstRate,
    pub notes: String,
    /// Free-form workflow label owned by the store.
    pub status: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Invoice date; aggregation falls back to `created_at` when absent.
    #[ts(as = "Option<String>")]
    pub invoice_date: Option<NaiveDate>,
    /// Totals as computed at the moment of last save.
    pub totals: TotalsSummary,
}

impl PersistedBill {
    /// Display label: the invoice number, or a short id fallback until the
    /// store assigns one.
    ///
    /// The id is opaque; the fallback truncates by characters so a
    /// multibyte id cannot split mid-character.
    pub fn invoice_label(&self) -> String {
        match &self.invoice_number {
            Some(number) => number.clone(),
            None => format!("#{}", self.id.chars().take(8).collect::<String>()),
        }
    }

    /// The calendar day this bill lands in for revenue bucketing.
    pub fn bucket_date(&self) -> NaiveDate {
        self.invoice_date
            .unwrap_or_else(|| self.created_at.date_naive())
    }

    /// Re-materializes the editable draft view of this bill.
    pub fn as_draft(&self) -> BillDraft {
        BillDraft {
            class: self.class,
            buyer: self.buyer.clone(),
            line_items: self.line_items.clone(),
            discount: self.discount,
            gst_rate: self.gst_rate,
            notes: self.notes.clone(),
        }
    }
}

// =============================================================================
// Conversion Input
// =============================================================================

/// Input for the Kacha → Pakka transition.
///
/// Address and GSTIN become mandatory on a Pakka bill, so the conversion
/// collects them along with the GST slab.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConversionInput {
    pub client_address: String,
    pub client_gst: String,
    pub gst_rate: GstRate,
}

// =============================================================================
// Unit Tests
// =============================================================================
