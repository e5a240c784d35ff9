use super::order::ChargeResponse;
use crate::model::{PaymentStatus, Ticket, TicketStatus, TicketType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TicketResponse {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub ticket_type: TicketType,
    pub price: i64,
    pub status: TicketStatus,
    pub booking_date: String,
    pub seat_number: Option<String>,
    pub code: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Ticket> for TicketResponse {
    fn from(value: Ticket) -> Self {
        TicketResponse {
            id: value.ticket_id,
            event_id: value.event_id,
            user_id: value.user_id,
            ticket_type: value.ticket_type,
            price: value.price,
            status: value.status,
            booking_date: value.booking_date.to_string(),
            seat_number: value.seat_number,
            code: value.code,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

/// Outcome of a consumer booking.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct BookingResponse {
    pub ticket_ids: Vec<i32>,
    pub order_id: i32,
    pub total_amount: i64,
    pub payment_status: PaymentStatus,
    /// Availability before this booking was taken out of it.
    pub available_before: i32,
    pub charge: Option<ChargeResponse>,
}
