use super::{MemoryStore, now};
use crate::{
    abstract_trait::event::{
        EventCommandRepositoryTrait, EventQueryRepositoryTrait, InventoryRepositoryTrait,
    },
    domain::requests::event::{CreateEventRequest, FindAllEvents, UpdateEventRequest},
    model::{Event, EventStatus},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;

#[async_trait]
impl EventQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Event>, RepositoryError> {
        Ok(self.lock()?.events.get(&id).cloned())
    }

    async fn find_published(
        &self,
        req: &FindAllEvents,
    ) -> Result<(Vec<Event>, i64), RepositoryError> {
        let state = self.lock()?;
        let location = req
            .location
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| e.is_published)
            .filter(|e| req.category.is_none_or(|c| e.category == c))
            .filter(|e| {
                location
                    .as_ref()
                    .is_none_or(|l| e.location.to_lowercase().contains(l.as_str()))
            })
            .filter(|e| req.from_date.is_none_or(|d| e.starts_at >= d))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.starts_at, e.event_id));

        let total = events.len() as i64;
        let (limit, offset) = req.limit_offset();
        let page = events
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok((page, total))
    }
}

#[async_trait]
impl EventCommandRepositoryTrait for MemoryStore {
    async fn create_event(
        &self,
        organizer_id: i32,
        req: &CreateEventRequest,
    ) -> Result<Event, RepositoryError> {
        let mut state = self.lock()?;

        if let Some(vendor_id) = req.vendor_id {
            if !state.vendors.contains_key(&vendor_id) {
                return Err(RepositoryError::ForeignKey(format!(
                    "vendor {vendor_id} does not exist"
                )));
            }
        }

        let id = state.next_id();
        let stamp = now();
        let event = Event {
            event_id: id,
            title: req.title.clone(),
            description: req.description.clone(),
            starts_at: req.starts_at,
            location: req.location.clone(),
            category: req.category,
            event_type: req.event_type,
            total_tickets: req.total_tickets,
            available_tickets: req.total_tickets,
            price: req.price,
            organizer_id,
            vendor_id: req.vendor_id,
            image_url: req.image_url.clone(),
            is_published: false,
            status: EventStatus::Draft,
            created_at: Some(stamp),
            updated_at: Some(stamp),
        };
        state.events.insert(id, event.clone());

        Ok(event)
    }

    async fn update_event(
        &self,
        id: i32,
        req: &UpdateEventRequest,
    ) -> Result<Event, RepositoryError> {
        let mut state = self.lock()?;
        let event = state.events.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        if let Some(title) = &req.title {
            event.title = title.clone();
        }
        if let Some(description) = &req.description {
            event.description = description.clone();
        }
        if let Some(starts_at) = req.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(location) = &req.location {
            event.location = location.clone();
        }
        if let Some(category) = req.category {
            event.category = category;
        }
        if let Some(event_type) = req.event_type {
            event.event_type = event_type;
        }
        if let Some(price) = req.price {
            event.price = price;
        }
        if let Some(image_url) = &req.image_url {
            event.image_url = Some(image_url.clone());
        }
        event.updated_at = Some(now());

        Ok(event.clone())
    }

    async fn publish_event(&self, id: i32) -> Result<Event, RepositoryError> {
        let mut state = self.lock()?;
        let event = state.events.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        event.is_published = true;
        event.status = EventStatus::Published;
        event.updated_at = Some(now());

        Ok(event.clone())
    }

    async fn delete_event(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;

        if state.tickets.values().any(|t| t.event_id == id) {
            return Err(RepositoryError::Conflict("event still has tickets".into()));
        }
        state
            .events
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl InventoryRepositoryTrait for MemoryStore {
    async fn decrement_available(
        &self,
        event_id: i32,
        quantity: i32,
        require_published: bool,
    ) -> Result<Option<Event>, RepositoryError> {
        let mut state = self.lock()?;

        let Some(event) = state.events.get_mut(&event_id) else {
            return Ok(None);
        };
        if event.available_tickets < quantity || (require_published && !event.is_published) {
            return Ok(None);
        }

        event.available_tickets -= quantity;
        event.updated_at = Some(now());
        Ok(Some(event.clone()))
    }

    async fn increment_available(
        &self,
        event_id: i32,
        quantity: i32,
    ) -> Result<Option<Event>, RepositoryError> {
        Ok(self.lock()?.release(event_id, quantity))
    }

    async fn resize_capacity(
        &self,
        event_id: i32,
        new_total: i32,
    ) -> Result<Option<Event>, RepositoryError> {
        let mut state = self.lock()?;

        let Some(event) = state.events.get_mut(&event_id) else {
            return Ok(None);
        };
        let issued = event.issued_tickets();
        if issued > new_total {
            return Ok(None);
        }

        event.total_tickets = new_total;
        event.available_tickets = new_total - issued;
        event.updated_at = Some(now());
        Ok(Some(event.clone()))
    }
}
