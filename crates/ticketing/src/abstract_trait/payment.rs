use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynPaymentGateway = Arc<dyn PaymentGatewayTrait + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub user_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub order_ref: String,
    pub amount: i64,
    pub customer: CustomerDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeHandle {
    pub transaction_id: String,
    pub redirect_url: Option<String>,
}

/// The external payment collaborator. Errors are reported as `Upstream`.
#[async_trait]
pub trait PaymentGatewayTrait {
    async fn create_charge(&self, req: &ChargeRequest) -> Result<ChargeHandle, ServiceError>;
    async fn get_charge_status(&self, transaction_id: &str) -> Result<String, ServiceError>;
}
