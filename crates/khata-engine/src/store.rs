//! # Bill Store
//!
//! The narrow contract with the persistence collaborator, plus an
//! in-memory implementation backing tests and embedding.
//!
//! The engine treats every store call as potentially failing and never
//! mutates local state optimistically: a draft lives in its session until
//! the store confirms a write.
//!
//! ## Ownership
//! The store exclusively owns identity fields: `id`, `invoice_number`,
//! `created_at` and `status` are assigned here, never by callers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use khata_core::error::BillError;
use khata_core::totals::compute_totals;
use khata_core::types::{BillClass, BillDraft, ConversionInput, PersistedBill};

use crate::convert;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Filter
// =============================================================================

/// Filter parameters for listing bills.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillFilter {
    /// Restrict to one bill class.
    pub class: Option<BillClass>,
    /// Inclusive lower bound on the bucket date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the bucket date.
    pub to: Option<NaiveDate>,
}

impl BillFilter {
    fn matches(&self, bill: &PersistedBill) -> bool {
        if let Some(class) = self.class {
            if bill.class != class {
                return false;
            }
        }
        let date = bill.bucket_date();
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Store Contract
// =============================================================================

/// The persistence collaborator.
///
/// Implemented over the REST backend in production; [`MemoryBillStore`]
/// implements it in-process. Every method is fallible and async; the
/// engine propagates failures without interpreting or retrying them.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Persists a new bill, assigning its identity fields and computing
    /// the totals snapshot.
    async fn create(&self, draft: &BillDraft) -> StoreResult<PersistedBill>;

    /// Replaces the draft fields of an existing Kacha bill and refreshes
    /// its totals snapshot.
    async fn update(&self, id: &str, draft: &BillDraft) -> StoreResult<PersistedBill>;

    /// Applies the Kacha → Pakka transition to a stored bill.
    async fn convert(&self, id: &str, input: &ConversionInput) -> StoreResult<PersistedBill>;

    /// Fetches a single bill by id.
    async fn get(&self, id: &str) -> StoreResult<PersistedBill>;

    /// Lists bills matching the filter, oldest first.
    async fn list(&self, filter: &BillFilter) -> StoreResult<Vec<PersistedBill>>;

    /// Removes a bill entirely. Irreversible.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// An in-memory [`BillStore`].
///
/// Identity fields follow the production contract: uuid ids, sequential
/// invoice numbers, store-assigned timestamps and status. Pakka bills
/// reject line-item updates.
pub struct MemoryBillStore {
    inner: Arc<RwLock<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    bills: Vec<PersistedBill>,
    next_invoice_seq: u64,
}

impl MemoryBillStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryBillStore {
            inner: Arc::new(RwLock::new(MemoryInner {
                bills: Vec::new(),
                next_invoice_seq: 1,
            })),
        }
    }
}

impl Default for MemoryBillStore {
    fn default() -> Self {
        MemoryBillStore::new()
    }
}

#[async_trait]
impl BillStore for MemoryBillStore {
    async fn create(&self, draft: &BillDraft) -> StoreResult<PersistedBill> {
        let mut inner = self.inner.write().await;

        let seq = inner.next_invoice_seq;
        inner.next_invoice_seq += 1;

        let now = Utc::now();
        let bill = PersistedBill {
            id: Uuid::new_v4().to_string(),
            invoice_number: Some(format!("INV-{seq:04}")),
            class: draft.class,
            buyer: draft.buyer.clone(),
            line_items: draft.line_items.clone(),
            discount: draft.discount,
            gst_rate: draft.gst_rate,
            notes: draft.notes.clone(),
            status: "created".to_string(),
            created_at: now,
            invoice_date: Some(now.date_naive()),
            totals: compute_totals(draft),
        };

        debug!(bill_id = %bill.id, invoice = ?bill.invoice_number, "bill created");
        inner.bills.push(bill.clone());
        Ok(bill)
    }

    async fn update(&self, id: &str, draft: &BillDraft) -> StoreResult<PersistedBill> {
        let mut inner = self.inner.write().await;
        let bill = inner
            .bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Pakka bills are immutable line-item-wise; only Kacha accepts edits.
        if bill.class == BillClass::Pakka {
            return Err(StoreError::ImmutableBill(id.to_string()));
        }

        bill.buyer = draft.buyer.clone();
        bill.line_items = draft.line_items.clone();
        bill.discount = draft.discount;
        bill.gst_rate = draft.gst_rate;
        bill.notes = draft.notes.clone();
        bill.totals = compute_totals(draft);

        debug!(bill_id = %id, "bill updated");
        Ok(bill.clone())
    }

    async fn convert(&self, id: &str, input: &ConversionInput) -> StoreResult<PersistedBill> {
        let mut inner = self.inner.write().await;
        let bill = inner
            .bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Keep the rule-violation kind so direct store callers can branch
        // on it just like service callers do.
        let converted = convert::convert(bill, input).map_err(|e| match e {
            BillError::AlreadyConverted => StoreError::ImmutableBill(id.to_string()),
            BillError::ConversionValidationFailed(missing) => {
                StoreError::MissingConversionFields(missing)
            }
            other => StoreError::Backend(other.to_string()),
        })?;
        *bill = converted.clone();
        Ok(converted)
    }

    async fn get(&self, id: &str) -> StoreResult<PersistedBill> {
        let inner = self.inner.read().await;
        inner
            .bills
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self, filter: &BillFilter) -> StoreResult<Vec<PersistedBill>> {
        let inner = self.inner.read().await;
        Ok(inner
            .bills
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.bills.len();
        inner.bills.retain(|b| b.id != id);

        if inner.bills.len() == before {
            Err(StoreError::NotFound(id.to_string()))
        } else {
            debug!(bill_id = %id, "bill deleted");
            Ok(())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
