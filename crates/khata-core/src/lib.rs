//! # khata-core: Pure Business Logic for Khata
//!
//! This crate is the **heart** of Khata. It contains all bill lifecycle
//! math as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Khata Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Dashboard Frontend (TypeScript)                │   │
//! │  │    Bill form ──► Totals preview ──► Convert modal ──► Charts   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST backend                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    khata-engine                                  │   │
//! │  │    DraftSession, convert(), InvalidationBus, BillStore          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ khata-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │   stats   │  │   │
//! │  │   │ BillDraft │  │   Money   │  │ compute_  │  │ dashboard_│  │   │
//! │  │   │ GstRate   │  │  Quantity │  │  totals   │  │  stats    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BillDraft, PersistedBill, GstRate, etc.)
//! - [`money`] - Money/Quantity types with integer arithmetic (no floats!)
//! - [`totals`] - The totals computation engine
//! - [`stats`] - Dashboard aggregation
//! - [`validation`] - Commit and conversion validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Total math**: `compute_totals` and `dashboard_stats` never fail; they
//!    clamp and zero instead of erroring
//!
//! ## Example Usage
//!
//! ```rust
//! use khata_core::money::{Money, Quantity};
//! use khata_core::totals::compute_totals;
//! use khata_core::types::{BillDraft, LineItem};
//!
//! let mut draft = BillDraft::new();
//! draft.line_items = vec![LineItem {
//!     name: "Cement bag".to_string(),
//!     rate: Money::from_rupees(450),
//!     quantity: Quantity::new(10),
//! }];
//!
//! // Kacha drafts never carry tax, whatever rate is stored.
//! let totals = compute_totals(&draft);
//! assert_eq!(totals.grand_total, Money::from_rupees(4500));
//! assert!(totals.tax.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod stats;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use khata_core::Money` instead of
// `use khata_core::money::Money`

pub use error::{BillError, BillResult, FieldError, LineItemIssue};
pub use money::{Money, Quantity};
pub use stats::{dashboard_stats, DashboardStats, DayRevenue, TypeSplit, REVENUE_WINDOW_DAYS};
pub use totals::{compute_totals, TotalsSummary};
pub use types::*;
