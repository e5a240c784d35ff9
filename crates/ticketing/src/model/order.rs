use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

string_enum! {
    PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

string_enum! {
    PaymentMethod {
        CreditCard => "credit_card",
        DebitCard => "debit_card",
        Paypal => "paypal",
        BankTransfer => "bank_transfer",
        Cash => "cash",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub ticket_ids: Vec<i32>,
    pub total_amount: i64,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    #[sqlx(try_from = "String")]
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Order fields known before its tickets have ids.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub total_amount: i64,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
}
