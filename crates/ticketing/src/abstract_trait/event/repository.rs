use crate::{
    domain::requests::event::{CreateEventRequest, FindAllEvents, UpdateEventRequest},
    model::Event,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynEventQueryRepository = Arc<dyn EventQueryRepositoryTrait + Send + Sync>;
pub type DynEventCommandRepository = Arc<dyn EventCommandRepositoryTrait + Send + Sync>;
pub type DynInventoryRepository = Arc<dyn InventoryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait EventQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<Event>, RepositoryError>;
    async fn find_published(
        &self,
        req: &FindAllEvents,
    ) -> Result<(Vec<Event>, i64), RepositoryError>;
}

/// Descriptive writes. Capacity counters are never touched here.
#[async_trait]
pub trait EventCommandRepositoryTrait {
    async fn create_event(
        &self,
        organizer_id: i32,
        req: &CreateEventRequest,
    ) -> Result<Event, RepositoryError>;
    async fn update_event(&self, id: i32, req: &UpdateEventRequest)
    -> Result<Event, RepositoryError>;
    async fn publish_event(&self, id: i32) -> Result<Event, RepositoryError>;
    /// Fails with `Conflict` while any ticket references the event.
    async fn delete_event(&self, id: i32) -> Result<(), RepositoryError>;
}

/// Atomic conditional writes on `available_tickets` / `total_tickets`.
///
/// Each method returns `Ok(None)` when its precondition did not hold (or the
/// event does not exist) and nothing was written.
#[async_trait]
pub trait InventoryRepositoryTrait {
    async fn decrement_available(
        &self,
        event_id: i32,
        quantity: i32,
        require_published: bool,
    ) -> Result<Option<Event>, RepositoryError>;
    async fn increment_available(
        &self,
        event_id: i32,
        quantity: i32,
    ) -> Result<Option<Event>, RepositoryError>;
    async fn resize_capacity(
        &self,
        event_id: i32,
        new_total: i32,
    ) -> Result<Option<Event>, RepositoryError>;
}
