//! # khata-engine: Bill Lifecycle Orchestration for Khata
//!
//! This crate is the async layer around `khata-core`: the draft controller
//! with its onboarding gate, the Kacha → Pakka conversion workflow, the
//! persistence contract, and the invalidation bus that tells dashboards to
//! refetch.
//!
//! `khata-core` stays pure; everything that touches time, identity, or a
//! channel lives here.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          khata-engine                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   BillService (Entry Point)                      │  │
//! │  │                                                                  │  │
//! │  │  commit: validate ──► store.create ──► publish BILL_CREATED      │  │
//! │  │  update / convert / list / delete                                 │  │
//! │  └───────────┬──────────────────────┬───────────────────────────────┘  │
//! │              ▼                      ▼                                   │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌──────────────────┐  │
//! │  │   DraftSession     │  │     BillStore      │  │ InvalidationBus  │  │
//! │  │                    │  │                    │  │                  │  │
//! │  │ OnboardingGate     │  │ async contract,    │  │ topic-keyed      │  │
//! │  │ checked before     │  │ MemoryBillStore    │  │ tokio broadcast, │  │
//! │  │ every mutation     │  │ in-process impl    │  │ fire-and-forget  │  │
//! │  └────────────────────┘  └────────────────────┘  └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`draft`] - `DraftSession`, the gated in-memory mutation controller
//! - [`convert`] - the one-way Kacha → Pakka transition
//! - [`store`] - `BillStore` contract and the in-memory implementation
//! - [`service`] - `BillService`, the commit/update/convert entry point
//! - [`channel`] - `InvalidationBus`, topic-keyed broadcast notifications
//! - [`error`] - `StoreError` and the combined `EngineError`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod channel;
pub mod convert;
pub mod draft;
pub mod error;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use channel::{topics, InvalidationBus};
pub use convert::convert;
pub use draft::{DraftSession, OnboardingGate, StaticGate};
pub use error::{EngineError, EngineResult, StoreError, StoreResult};
pub use service::BillService;
pub use store::{BillFilter, BillStore, MemoryBillStore};
