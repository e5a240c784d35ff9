use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Status notification pushed by the payment gateway.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct PaymentNotificationRequest {
    pub order_id: i32,

    #[validate(length(min = 1))]
    pub transaction_id: String,

    #[validate(length(min = 1))]
    pub transaction_status: String,
}
