use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

string_enum! {
    EventCategory {
        Music => "music",
        Sports => "sports",
        Conference => "conference",
        Workshop => "workshop",
        Festival => "festival",
        Theater => "theater",
        Comedy => "comedy",
        Exhibition => "exhibition",
        Education => "education",
        Networking => "networking",
    }
}

string_enum! {
    EventStatus {
        Draft => "draft",
        Published => "published",
        Cancelled => "cancelled",
        Completed => "completed",
    }
}

string_enum! {
    EventType {
        InPerson => "in_person",
        Online => "online",
        Hybrid => "hybrid",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub event_id: i32,
    pub title: String,
    pub description: String,
    pub starts_at: NaiveDateTime,
    pub location: String,
    #[sqlx(try_from = "String")]
    pub category: EventCategory,
    #[sqlx(try_from = "String")]
    pub event_type: EventType,
    pub total_tickets: i32,
    pub available_tickets: i32,
    pub price: i64,
    pub organizer_id: i32,
    pub vendor_id: Option<i32>,
    pub image_url: Option<String>,
    pub is_published: bool,
    #[sqlx(try_from = "String")]
    pub status: EventStatus,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Event {
    /// Tickets currently counted against capacity.
    pub fn issued_tickets(&self) -> i32 {
        self.total_tickets - self.available_tickets
    }
}
