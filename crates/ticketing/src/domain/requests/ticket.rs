use crate::model::{PaymentMethod, TicketType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct BookTicketRequest {
    pub event_id: i32,

    pub quantity: i32,

    #[serde(default = "default_ticket_type")]
    pub ticket_type: TicketType,

    #[serde(default = "default_payment_method")]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct IssueTicketsRequest {
    pub event_id: i32,

    pub quantity: i32,

    #[serde(default = "default_ticket_type")]
    pub ticket_type: TicketType,

    /// Overrides the event's price for every issued ticket.
    #[validate(range(min = 0))]
    pub price: Option<i64>,

    #[validate(length(max = 32))]
    pub seat_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone, Default)]
pub struct UpdateTicketRequest {
    pub ticket_type: Option<TicketType>,

    #[validate(length(max = 32))]
    pub seat_number: Option<String>,
}

fn default_ticket_type() -> TicketType {
    TicketType::General
}

fn default_payment_method() -> PaymentMethod {
    PaymentMethod::CreditCard
}
