use crate::model::{EventCategory, EventType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, IntoParams, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct FindAllEvents {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    pub category: Option<EventCategory>,
    pub location: Option<String>,
    pub from_date: Option<NaiveDateTime>,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

impl FindAllEvents {
    pub fn limit_offset(&self) -> (i64, i64) {
        let page = self.page.max(1) as i64;
        let size = self.page_size.clamp(1, 100) as i64;
        (size, (page - 1) * size)
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    pub starts_at: NaiveDateTime,

    #[validate(length(min = 1))]
    pub location: String,

    pub category: EventCategory,

    #[serde(default = "default_event_type")]
    pub event_type: EventType,

    #[validate(range(min = 1))]
    pub total_tickets: i32,

    #[validate(range(min = 0))]
    pub price: i64,

    pub vendor_id: Option<i32>,

    #[validate(url)]
    pub image_url: Option<String>,
}

fn default_event_type() -> EventType {
    EventType::InPerson
}

/// Fields left `None` keep their stored value.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone, Default)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub starts_at: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub event_type: Option<EventType>,

    #[validate(range(min = 0))]
    pub total_tickets: Option<i32>,

    #[validate(range(min = 0))]
    pub price: Option<i64>,

    #[validate(url)]
    pub image_url: Option<String>,
}
