use crate::model::{Order, PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub ticket_ids: Vec<i32>,
    pub total_amount: i64,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.order_id,
            user_id: value.user_id,
            ticket_ids: value.ticket_ids,
            total_amount: value.total_amount,
            payment_status: value.payment_status,
            payment_method: value.payment_method,
            transaction_id: value.transaction_id,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct ChargeResponse {
    pub order_id: i32,
    pub transaction_id: String,
    pub redirect_url: Option<String>,
}
