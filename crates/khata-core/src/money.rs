//! # Money Module
//!
//! Provides the `Money` and `Quantity` types for handling monetary values
//! and unit counts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many billing systems:                                               │
//! │    ₹10.00 / 3 = ₹3.33 (×3 = ₹9.99)  → Lost ₹0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    1000 paise / 3 = 333 paise (×3 = 999 paise)                          │
//! │    We KNOW we lost 1 paisa, and handle it explicitly                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use khata_core::money::Money;
//!
//! // Create from paise (preferred)
//! let rate = Money::from_paise(1099); // ₹10.99
//!
//! // Arithmetic operations
//! let doubled = rate * 2;                       // ₹21.98
//! let total = rate + Money::from_paise(500);    // ₹15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::GstRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction must be representable mid-computation;
///   public invariants (rates, discounts ≥ 0) are enforced at the edges
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// LineItem.rate ──► LineItem.amount ──► subtotal ──► discount ──► GST ──► grand total
/// ```
/// Every monetary value in the system flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// let rate = Money::from_paise(1099); // Represents ₹10.99
    /// assert_eq!(rate.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// let rate = Money::from_rupees(100); // ₹100.00
    /// assert_eq!(rate.paise(), 10000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps the value to zero if negative.
    ///
    /// Totals math never surfaces a negative amount: a discount larger
    /// than the subtotal yields ₹0.00, not a negative grand total.
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// let over_discounted = Money::from_paise(-750);
    /// assert_eq!(over_discounted.clamp_non_negative(), Money::zero());
    /// ```
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Calculates GST on this amount using round-half-up at the paisa.
    ///
    /// ## Implementation
    /// We use integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5).
    /// `i128` intermediate prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::money::Money;
    /// use khata_core::types::GstRate;
    ///
    /// let base = Money::from_rupees(230); // ₹230.00
    /// let gst = base.gst(GstRate::Eighteen);
    /// // ₹230.00 × 18% = ₹41.40 exactly
    /// assert_eq!(gst.paise(), 4140);
    /// ```
    pub fn gst(&self, rate: GstRate) -> Money {
        let gst_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(gst_paise as i64)
    }

    /// Formats the value using Indian magnitude bucketing.
    ///
    /// Dashboard numbers collapse by magnitude: crores, lakhs, thousands.
    /// The thresholds operate on the rupee value, not paise.
    ///
    /// ## Buckets
    /// - ≥ ₹1,00,00,000 → `"{:.2}Cr"` of the value divided by one crore
    /// - ≥ ₹1,00,000    → `"{:.2}L"` (lakhs)
    /// - ≥ ₹1,000       → `"{:.2}K"` (thousands)
    /// - below that      → the exact rupee value
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(5_120_050).compact_inr(), "51.20L");
    /// assert_eq!(Money::from_rupees(12_000_000).compact_inr(), "1.20Cr");
    /// assert_eq!(Money::from_rupees(1_500).compact_inr(), "1.50K");
    /// assert_eq!(Money::from_rupees(950).compact_inr(), "950");
    /// ```
    pub fn compact_inr(&self) -> String {
        const CRORE: f64 = 1_00_00_000.0;
        const LAKH: f64 = 1_00_000.0;
        const THOUSAND: f64 = 1_000.0;

        let rupees = self.0 as f64 / 100.0;
        if rupees >= CRORE {
            format!("{:.2}Cr", rupees / CRORE)
        } else if rupees >= LAKH {
            format!("{:.2}L", rupees / LAKH)
        } else if rupees >= THOUSAND {
            format!("{:.2}K", rupees / THOUSAND)
        } else if self.0 % 100 == 0 {
            format!("{}", self.0 / 100)
        } else {
            format!("{:.2}", rupees)
        }
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A unit count on a line item.
///
/// Quantities are whole units. Zero is representable (a freshly added
/// blank line item), but commit validation requires every quantity to be
/// positive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from a unit count.
    #[inline]
    pub const fn new(units: i64) -> Self {
        Quantity(units)
    }

    /// Returns the unit count.
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Checks if the quantity is positive (> 0).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.rupees_part().abs(),
            self.paise_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Multiplication by a Quantity (line item amounts).
impl Mul<Quantity> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Quantity) -> Self {
        Money(self.0 * qty.get())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
