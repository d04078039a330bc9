//! # Bill Service
//!
//! Orchestrates the commit / update / convert flows over the store and
//! the invalidation bus.
//!
//! ## Rules
//! - A draft is validated before any store call.
//! - Invalidation topics are published strictly after the store reports
//!   success. A failing store publishes nothing.
//! - The service never interprets store failures; they pass through as
//!   [`EngineError::Store`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use khata_core::types::{ConversionInput, PersistedBill};

use crate::channel::{topics, InvalidationBus};
use crate::convert;
use crate::draft::DraftSession;
use crate::error::EngineResult;
use crate::store::{BillFilter, BillStore};

/// The engine's top-level entry point for bill lifecycle operations.
pub struct BillService {
    store: Arc<dyn BillStore>,
    bus: Arc<InvalidationBus>,
}

impl BillService {
    pub fn new(store: Arc<dyn BillStore>, bus: Arc<InvalidationBus>) -> Self {
        BillService { store, bus }
    }

    /// Access to the invalidation bus, for subscribers.
    pub fn bus(&self) -> &Arc<InvalidationBus> {
        &self.bus
    }

    /// Validates the session's draft and persists it as a new bill.
    ///
    /// Publishes [`topics::BILL_CREATED`] only after the store confirms
    /// the write. The session stays usable on failure so the caller can
    /// correct the draft and retry.
    pub async fn commit(&self, session: &DraftSession) -> EngineResult<PersistedBill> {
        session.validate()?;

        let bill = self.store.create(session.draft()).await?;
        info!(bill_id = %bill.id, class = ?bill.class, "bill committed");

        self.bus.publish(topics::BILL_CREATED);
        Ok(bill)
    }

    /// Re-validates the draft and replaces the stored bill's fields.
    pub async fn update(&self, id: &str, session: &DraftSession) -> EngineResult<PersistedBill> {
        session.validate()?;

        let bill = self.store.update(id, session.draft()).await?;
        debug!(bill_id = %id, "bill updated");
        Ok(bill)
    }

    /// Applies the Kacha → Pakka transition to a stored bill.
    ///
    /// Rule violations (already converted, missing conversion fields) are
    /// surfaced as typed [`BillError`]s before the store write is attempted.
    pub async fn convert(&self, id: &str, input: &ConversionInput) -> EngineResult<PersistedBill> {
        let current = self.store.get(id).await?;
        if let Err(e) = convert::convert(&current, input) {
            warn!(bill_id = %id, error = %e, "conversion rejected");
            return Err(e.into());
        }

        let bill = self.store.convert(id, input).await?;
        info!(bill_id = %id, invoice = ?bill.invoice_number, "bill converted to pakka");
        Ok(bill)
    }

    /// Lists stored bills matching the filter.
    pub async fn list(&self, filter: &BillFilter) -> EngineResult<Vec<PersistedBill>> {
        Ok(self.store.list(filter).await?)
    }

    /// Deletes a stored bill. Irreversible.
    pub async fn delete(&self, id: &str) -> EngineResult<()> {
        self.store.delete(id).await?;
        info!(bill_id = %id, "bill deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use khata_core::error::{BillError, FieldError};
    use khata_core::money::{Money, Quantity};
    use khata_core::types::{BillDraft, BillClass, GstRate, LineItem};
    use crate::draft::StaticGate;
    use crate::error::{EngineError, StoreError, StoreResult};
    use crate::store::MemoryBillStore;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn session() -> DraftSession {
        let mut draft = BillDraft::new();
        draft.buyer.client_name = "Sharma Traders".to_string();
        draft.line_items = vec![LineItem {
            name: "Cement bag".to_string(),
            rate: Money::from_rupees(450),
            quantity: Quantity::new(10),
        }];
        DraftSession::from_draft(draft, Arc::new(StaticGate(true)))
    }

    fn service() -> BillService {
        BillService::new(
            Arc::new(MemoryBillStore::new()),
            Arc::new(InvalidationBus::new()),
        )
    }

    fn conversion_input() -> ConversionInput {
        ConversionInput {
            client_address: "14 MG Road, Pune".to_string(),
            client_gst: "27AAPFU0939F1ZV".to_string(),
            gst_rate: GstRate::Eighteen,
        }
    }

    /// A store whose writes always fail, for publish-ordering tests.
    struct FailingStore;

    #[async_trait]
    impl BillStore for FailingStore {
        async fn create(&self, _draft: &BillDraft) -> StoreResult<PersistedBill> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        async fn update(&self, id: &str, _draft: &BillDraft) -> StoreResult<PersistedBill> {
            Err(StoreError::NotFound(id.to_string()))
        }
        async fn convert(&self, id: &str, _input: &ConversionInput) -> StoreResult<PersistedBill> {
            Err(StoreError::NotFound(id.to_string()))
        }
        async fn get(&self, id: &str) -> StoreResult<PersistedBill> {
            Err(StoreError::NotFound(id.to_string()))
        }
        async fn list(&self, _filter: &BillFilter) -> StoreResult<Vec<PersistedBill>> {
            Ok(Vec::new())
        }
        async fn delete(&self, id: &str) -> StoreResult<()> {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    #[tokio::test]
    async fn test_commit_persists_and_publishes() {
        init_tracing();
        let svc = service();
        let mut rx = svc.bus().subscribe(topics::BILL_CREATED);

        let bill = svc.commit(&session()).await.unwrap();
        assert_eq!(bill.invoice_number.as_deref(), Some("INV-0001"));
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_commit_rejects_invalid_draft_without_store_call() {
        let svc = BillService::new(Arc::new(FailingStore), Arc::new(InvalidationBus::new()));
        let mut rx = svc.bus().subscribe(topics::BILL_CREATED);

        let blank = DraftSession::new(Arc::new(StaticGate(true)));
        let err = svc.commit(&blank).await.unwrap_err();
        match err {
            EngineError::Bill(BillError::ValidationFailed(fields)) => {
                assert!(fields.contains(&FieldError::EmptyClientName));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failing_store_publishes_nothing() {
        let svc = BillService::new(Arc::new(FailingStore), Arc::new(InvalidationBus::new()));
        let mut rx = svc.bus().subscribe(topics::BILL_CREATED);

        let err = svc.commit(&session()).await.unwrap_err();
        assert!(matches!(err, EngineError::Store(StoreError::Backend(_))));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_convert_surfaces_typed_rule_errors() {
        init_tracing();
        let svc = service();
        let bill = svc.commit(&session()).await.unwrap();

        let incomplete = ConversionInput {
            client_address: String::new(),
            client_gst: String::new(),
            gst_rate: GstRate::Eighteen,
        };
        let err = svc.convert(&bill.id, &incomplete).await.unwrap_err();
        match err {
            EngineError::Bill(BillError::ConversionValidationFailed(missing)) => {
                assert_eq!(missing, vec!["client_address", "client_gst"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        svc.convert(&bill.id, &conversion_input()).await.unwrap();
        let again = svc.convert(&bill.id, &conversion_input()).await.unwrap_err();
        assert!(matches!(
            again,
            EngineError::Bill(BillError::AlreadyConverted)
        ));
    }

    #[tokio::test]
    async fn test_update_then_list_roundtrip() {
        let svc = service();
        let bill = svc.commit(&session()).await.unwrap();

        let mut edited = session();
        edited.set_discount(Money::from_rupees(500)).unwrap();
        let updated = svc.update(&bill.id, &edited).await.unwrap();
        assert_eq!(updated.totals.grand_total, Money::from_rupees(4000));

        let kacha = svc
            .list(&BillFilter {
                class: Some(BillClass::Kacha),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(kacha.len(), 1);

        svc.delete(&bill.id).await.unwrap();
        assert!(svc.list(&BillFilter::default()).await.unwrap().is_empty());
    }
}
