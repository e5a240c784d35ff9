mod common;

use async_trait::async_trait;
use common::event_request;
use proptest::prelude::*;
use shared::errors::{ErrorKind, RepositoryError, ServiceError};
use std::sync::Arc;
use ticketing::{
    abstract_trait::event::{
        EventCommandRepositoryTrait, EventQueryRepositoryTrait, InventoryRepositoryTrait,
    },
    domain::requests::event::FindAllEvents,
    model::Event,
    repository::memory::MemoryStore,
    service::InventoryLedger,
};

/// Storage that is down.
struct Unreachable;

#[async_trait]
impl InventoryRepositoryTrait for Unreachable {
    async fn decrement_available(
        &self,
        _event_id: i32,
        _quantity: i32,
        _require_published: bool,
    ) -> Result<Option<Event>, RepositoryError> {
        Err(RepositoryError::Custom("connection refused".into()))
    }

    async fn increment_available(
        &self,
        _event_id: i32,
        _quantity: i32,
    ) -> Result<Option<Event>, RepositoryError> {
        Err(RepositoryError::Custom("connection refused".into()))
    }

    async fn resize_capacity(
        &self,
        _event_id: i32,
        _new_total: i32,
    ) -> Result<Option<Event>, RepositoryError> {
        Err(RepositoryError::Custom("connection refused".into()))
    }
}

#[async_trait]
impl EventQueryRepositoryTrait for Unreachable {
    async fn find_by_id(&self, _id: i32) -> Result<Option<Event>, RepositoryError> {
        Err(RepositoryError::Custom("connection refused".into()))
    }

    async fn find_published(
        &self,
        _req: &FindAllEvents,
    ) -> Result<(Vec<Event>, i64), RepositoryError> {
        Err(RepositoryError::Custom("connection refused".into()))
    }
}

async fn store_with_event(total: i32) -> (MemoryStore, i32) {
    let store = MemoryStore::new();
    let event = store
        .create_event(1, &event_request(total, 10))
        .await
        .unwrap();
    store.publish_event(event.event_id).await.unwrap();
    (store, event.event_id)
}

#[tokio::test]
async fn storage_failure_is_upstream_not_sold_out() {
    let (store, event_id) = store_with_event(5).await;
    let ledger = InventoryLedger::new(Arc::new(store), Arc::new(Unreachable));

    let err = ledger.reserve_capacity(event_id, 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamFailure);

    let err = ledger.release_capacity(event_id, 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamFailure);
}

#[tokio::test]
async fn failed_refusal_lookup_is_upstream() {
    let (store, event_id) = store_with_event(1).await;
    let ledger = InventoryLedger::new(Arc::new(Unreachable), Arc::new(store));

    // The conditional update refuses, then the diagnosis read fails.
    ledger.reserve_capacity(event_id, 1).await.unwrap();
    let err = ledger.reserve_capacity(event_id, 1).await.unwrap_err();
    assert!(matches!(err, ServiceError::Upstream(_)));
}

#[tokio::test]
async fn release_never_exceeds_total() {
    let (store, event_id) = store_with_event(3).await;
    let ledger = InventoryLedger::new(Arc::new(store.clone()), Arc::new(store));

    let reservation = ledger.reserve_capacity(event_id, 2).await.unwrap();
    assert_eq!(reservation.available_before, 3);
    assert_eq!(reservation.event.available_tickets, 1);

    let event = ledger.release_capacity(event_id, 5).await.unwrap();
    assert_eq!(event.available_tickets, 3);
}

#[tokio::test]
async fn resize_reports_issued_count() {
    let (store, event_id) = store_with_event(10).await;
    let ledger = InventoryLedger::new(Arc::new(store.clone()), Arc::new(store));

    ledger.reserve_capacity(event_id, 6).await.unwrap();
    let err = ledger.resize_capacity(event_id, 5).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidCapacity {
            requested: 5,
            issued: 6
        }
    ));

    let event = ledger.resize_capacity(event_id, 6).await.unwrap();
    assert_eq!((event.total_tickets, event.available_tickets), (6, 0));

    let err = ledger.resize_capacity(404, 6).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Reserve(i32),
    Release(i32),
    Resize(i32),
}

fn ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (1i32..6).prop_map(LedgerOp::Reserve),
        (1i32..6).prop_map(LedgerOp::Release),
        (0i32..25).prop_map(LedgerOp::Resize),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn available_stays_within_total(
        total in 1i32..20,
        ops in prop::collection::vec(ledger_op(), 1..25),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async {
            let (store, event_id) = store_with_event(total).await;
            let ledger = InventoryLedger::new(Arc::new(store.clone()), Arc::new(store));

            for op in ops {
                let outcome = match op {
                    LedgerOp::Reserve(n) => ledger.reserve_capacity(event_id, n).await.map(|r| r.event),
                    LedgerOp::Release(n) => ledger.release_capacity(event_id, n).await,
                    LedgerOp::Resize(n) => ledger.resize_capacity(event_id, n).await,
                };

                match outcome {
                    Ok(event) => {
                        assert!(event.available_tickets >= 0);
                        assert!(event.available_tickets <= event.total_tickets);
                    }
                    Err(err) => assert!(matches!(
                        err.kind(),
                        ErrorKind::InsufficientInventory | ErrorKind::InvalidCapacity
                    )),
                }
            }
        });
    }
}
