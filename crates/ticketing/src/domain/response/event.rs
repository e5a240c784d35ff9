use crate::model::{Event, EventCategory, EventStatus, EventType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EventResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub location: String,
    pub category: EventCategory,
    pub event_type: EventType,
    pub total_tickets: i32,
    pub available_tickets: i32,
    pub price: i64,
    pub organizer_id: i32,
    pub vendor_id: Option<i32>,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub status: EventStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        EventResponse {
            id: value.event_id,
            title: value.title,
            description: value.description,
            starts_at: value.starts_at.to_string(),
            location: value.location,
            category: value.category,
            event_type: value.event_type,
            total_tickets: value.total_tickets,
            available_tickets: value.available_tickets,
            price: value.price,
            organizer_id: value.organizer_id,
            vendor_id: value.vendor_id,
            image_url: value.image_url,
            is_published: value.is_published,
            status: value.status,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
