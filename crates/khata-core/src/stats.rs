//! # Dashboard Aggregation
//!
//! Folds a collection of persisted bills into the numbers the dashboard
//! shows: revenue/GST/discount sums, a day-bucketed revenue series and the
//! Kacha/Pakka split.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dashboard Aggregation                               │
//! │                                                                         │
//! │  store.list(filter) ──► [PersistedBill] ──► dashboard_stats()          │
//! │                                                   │                     │
//! │                         ┌─────────────────────────┼──────────────┐     │
//! │                         ▼                         ▼              ▼     │
//! │                  revenue/tax/discount      revenue_by_day    type split│
//! │                  unit sums                 (last 7 days,     kacha vs  │
//! │                                            ascending)        pakka     │
//! │                                                                         │
//! │  Sums read the persisted totals SNAPSHOT, never recompute from line    │
//! │  items: historical display follows what was saved.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{BillClass, PersistedBill};

// =============================================================================
// Constants
// =============================================================================

/// How many day buckets the revenue series keeps.
///
/// A display-window policy: older buckets are dropped from the series,
/// not filtered out of the underlying data.
pub const REVENUE_WINDOW_DAYS: usize = 7;

// =============================================================================
// Dashboard Stats
// =============================================================================

/// One calendar day's revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DayRevenue {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue: Money,
}

/// Grand-total split by bill class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TypeSplit {
    pub pakka: Money,
    pub kacha: Money,
}

/// The aggregated dashboard numbers.
///
/// Consumed read-only by the chart and summary-card layers; display
/// formatting (including [`Money::compact_inr`] magnitude bucketing) is
/// theirs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    /// Σ grand_total over all bills.
    pub total_revenue: Money,
    /// Σ tax; Kacha bills contribute zero by construction.
    pub total_tax: Money,
    /// Σ discount.
    pub total_discount: Money,
    /// Σ quantity over all bills, all line items.
    pub total_units_sold: i64,
    /// Revenue per calendar day, ascending, at most
    /// [`REVENUE_WINDOW_DAYS`] entries (the most recent ones).
    pub revenue_by_day: Vec<DayRevenue>,
    /// Grand totals split by bill class.
    pub type_split: TypeSplit,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Folds persisted bills into dashboard stats.
///
/// Pure and total: any slice of bills produces a result, an empty slice
/// produces all zeros. Sums come from each bill's persisted totals
/// snapshot, the source of truth for historical display.
pub fn dashboard_stats(bills: &[PersistedBill]) -> DashboardStats {
    let mut stats = DashboardStats::default();
    // BTreeMap keeps day buckets chronologically sorted as they fill.
    let mut buckets: BTreeMap<NaiveDate, Money> = BTreeMap::new();

    for bill in bills {
        stats.total_revenue += bill.totals.grand_total;
        stats.total_tax += bill.totals.tax;
        stats.total_discount += bill.totals.discount;
        stats.total_units_sold += bill
            .line_items
            .iter()
            .map(|item| item.quantity.get())
            .sum::<i64>();

        match bill.class {
            BillClass::Pakka => stats.type_split.pakka += bill.totals.grand_total,
            BillClass::Kacha => stats.type_split.kacha += bill.totals.grand_total,
        }

        *buckets.entry(bill.bucket_date()).or_insert_with(Money::zero) +=
            bill.totals.grand_total;
    }

    let mut series: Vec<DayRevenue> = buckets
        .into_iter()
        .map(|(date, revenue)| DayRevenue { date, revenue })
        .collect();

    // Keep only the most recent window, still ascending.
    if series.len() > REVENUE_WINDOW_DAYS {
        series.drain(..series.len() - REVENUE_WINDOW_DAYS);
    }
    stats.revenue_by_day = series;

    stats
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Quantity;
    use crate::totals::compute_totals;
    use crate::types::{BillDraft, Buyer, GstRate, LineItem};
    use chrono::{TimeZone, Utc};

    fn bill(
        id: &str,
        class: BillClass,
        grand_total_rupees: i64,
        day: NaiveDate,
        quantity: i64,
    ) -> PersistedBill {
        let mut draft = BillDraft::new();
        draft.class = class;
        draft.buyer = Buyer {
            client_name: "Client".to_string(),
            client_address: "Address".to_string(),
            client_gst: "27AAPFU0939F1ZV".to_string(),
        };
        // Quantity must divide the target so rate × quantity lands exactly.
        draft.line_items = vec![LineItem {
            name: "Item".to_string(),
            rate: Money::from_paise(grand_total_rupees * 100 / quantity),
            quantity: Quantity::new(quantity),
        }];

        let totals = compute_totals(&draft);
        PersistedBill {
            id: id.to_string(),
            invoice_number: Some(format!("INV-{id}")),
            class: draft.class,
            buyer: draft.buyer.clone(),
            line_items: draft.line_items.clone(),
            discount: draft.discount,
            gst_rate: draft.gst_rate,
            notes: String::new(),
            status: "created".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            invoice_date: Some(day),
            totals,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    /// Three bills with grand totals 120,000 / 5,000,000 / 50 on the same
    /// day land in one bucket summing to 5,120,050, which formats into the
    /// lakh magnitude.
    #[test]
    fn test_same_day_bills_share_one_bucket() {
        let bills = vec![
            bill("a", BillClass::Kacha, 120_000, day(5), 1),
            bill("b", BillClass::Kacha, 5_000_000, day(5), 1),
            bill("c", BillClass::Kacha, 50, day(5), 1),
        ];

        let stats = dashboard_stats(&bills);
        assert_eq!(stats.revenue_by_day.len(), 1);
        assert_eq!(
            stats.revenue_by_day[0].revenue,
            Money::from_rupees(5_120_050)
        );
        assert_eq!(stats.revenue_by_day[0].revenue.compact_inr(), "51.20L");
    }

    #[test]
    fn test_window_keeps_most_recent_seven_ascending() {
        let bills: Vec<PersistedBill> = (1..=10)
            .map(|d| bill(&d.to_string(), BillClass::Kacha, 100, day(d), 1))
            .collect();

        let stats = dashboard_stats(&bills);
        assert_eq!(stats.revenue_by_day.len(), REVENUE_WINDOW_DAYS);
        assert_eq!(stats.revenue_by_day[0].date, day(4));
        assert_eq!(stats.revenue_by_day[6].date, day(10));

        let dates: Vec<NaiveDate> = stats.revenue_by_day.iter().map(|b| b.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_type_split_and_sums() {
        let bills = vec![
            bill("k1", BillClass::Kacha, 100, day(1), 2),
            bill("k2", BillClass::Kacha, 200, day(2), 4),
            bill("p1", BillClass::Pakka, 500, day(2), 5),
        ];

        let stats = dashboard_stats(&bills);
        assert_eq!(stats.type_split.kacha, Money::from_rupees(300));
        assert_eq!(stats.type_split.pakka, Money::from_rupees(500));
        assert_eq!(stats.total_revenue, Money::from_rupees(800));
        assert_eq!(stats.total_units_sold, 11);
    }

    #[test]
    fn test_tax_sums_come_from_snapshots() {
        // Build one Pakka bill whose snapshot carries tax.
        let mut draft = BillDraft::new();
        draft.class = BillClass::Pakka;
        draft.gst_rate = GstRate::Eighteen;
        draft.buyer.client_name = "Client".to_string();
        draft.line_items = vec![LineItem {
            name: "Item".to_string(),
            rate: Money::from_rupees(100),
            quantity: Quantity::new(1),
        }];
        let totals = compute_totals(&draft);

        let pakka = PersistedBill {
            id: "p".to_string(),
            invoice_number: None,
            class: draft.class,
            buyer: draft.buyer.clone(),
            line_items: draft.line_items.clone(),
            discount: draft.discount,
            gst_rate: draft.gst_rate,
            notes: String::new(),
            status: "created".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            invoice_date: None,
            totals,
        };

        let kacha = bill("k", BillClass::Kacha, 100, day(1), 1);

        let stats = dashboard_stats(&[pakka, kacha]);
        assert_eq!(stats.total_tax, Money::from_rupees(18));
    }

    #[test]
    fn test_missing_invoice_date_falls_back_to_created_at() {
        let mut b = bill("x", BillClass::Kacha, 100, day(1), 1);
        b.invoice_date = None;

        let stats = dashboard_stats(&[b]);
        assert_eq!(
            stats.revenue_by_day[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_empty_slice_is_all_zero() {
        let stats = dashboard_stats(&[]);
        assert_eq!(stats, DashboardStats::default());
    }
}
