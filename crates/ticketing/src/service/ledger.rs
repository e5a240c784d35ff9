use crate::{
    abstract_trait::event::{DynEventQueryRepository, DynInventoryRepository},
    model::Event,
};
use shared::errors::ServiceError;
use tracing::{info, warn};

/// Successful capacity reservation.
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Event row as it stands after the decrement.
    pub event: Event,
    pub available_before: i32,
}

/// Sole writer of an event's capacity counters.
#[derive(Clone)]
pub struct InventoryLedger {
    events: DynEventQueryRepository,
    inventory: DynInventoryRepository,
}

impl InventoryLedger {
    pub fn new(events: DynEventQueryRepository, inventory: DynInventoryRepository) -> Self {
        Self { events, inventory }
    }

    /// Consumer path: the event must be published.
    pub async fn reserve_capacity(
        &self,
        event_id: i32,
        quantity: i32,
    ) -> Result<Reservation, ServiceError> {
        self.take(event_id, quantity, true).await
    }

    /// Organizer path: same atomic decrement, publication not required.
    pub async fn allocate_capacity(
        &self,
        event_id: i32,
        quantity: i32,
    ) -> Result<Reservation, ServiceError> {
        self.take(event_id, quantity, false).await
    }

    pub async fn release_capacity(&self, event_id: i32, quantity: i32) -> Result<Event, ServiceError> {
        if quantity < 1 {
            return Err(ServiceError::Validation(vec![
                "release quantity must be positive".into(),
            ]));
        }

        let event = self
            .inventory
            .increment_available(event_id, quantity)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event"))?;

        info!(
            "🔄 Released {quantity} unit(s) on event {event_id}, available={}",
            event.available_tickets
        );
        Ok(event)
    }

    pub async fn resize_capacity(&self, event_id: i32, new_total: i32) -> Result<Event, ServiceError> {
        if new_total < 0 {
            return Err(ServiceError::InvalidCapacity {
                requested: new_total,
                issued: 0,
            });
        }

        if let Some(event) = self.inventory.resize_capacity(event_id, new_total).await? {
            info!(
                "📐 Event {event_id} resized to {new_total}, available={}",
                event.available_tickets
            );
            return Ok(event);
        }

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event"))?;

        Err(ServiceError::InvalidCapacity {
            requested: new_total,
            issued: event.issued_tickets(),
        })
    }

    async fn take(
        &self,
        event_id: i32,
        quantity: i32,
        require_published: bool,
    ) -> Result<Reservation, ServiceError> {
        if quantity < 1 {
            return Err(ServiceError::Validation(vec![
                "reservation quantity must be positive".into(),
            ]));
        }

        match self
            .inventory
            .decrement_available(event_id, quantity, require_published)
            .await?
        {
            Some(event) => {
                info!(
                    "🎫 Took {quantity} unit(s) on event {event_id}, available={}",
                    event.available_tickets
                );
                Ok(Reservation {
                    available_before: event.available_tickets + quantity,
                    event,
                })
            }
            None => Err(self.explain_refusal(event_id, quantity, require_published).await),
        }
    }

    /// The conditional update matched no row; find out which precondition failed.
    async fn explain_refusal(
        &self,
        event_id: i32,
        quantity: i32,
        require_published: bool,
    ) -> ServiceError {
        match self.events.find_by_id(event_id).await {
            Err(e) => e.into(),
            Ok(None) => ServiceError::not_found("Event"),
            Ok(Some(event)) if require_published && !event.is_published => {
                warn!("⚠️ Refused reservation on unpublished event {event_id}");
                ServiceError::EventNotPublished
            }
            Ok(Some(event)) => {
                warn!(
                    "⚠️ Refused {quantity} unit(s) on event {event_id}, available={}",
                    event.available_tickets
                );
                ServiceError::InsufficientInventory {
                    requested: quantity,
                    available: event.available_tickets,
                }
            }
        }
    }
}
