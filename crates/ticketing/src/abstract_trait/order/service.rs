use crate::{
    domain::{
        requests::order::PaymentNotificationRequest,
        response::order::{ChargeResponse, OrderResponse},
    },
    policy::Actor,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;
pub type DynPaymentService = Arc<dyn PaymentServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderServiceTrait {
    async fn get_order(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn list_user_orders(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
}

#[async_trait]
pub trait PaymentServiceTrait {
    async fn create_charge(
        &self,
        actor: &Actor,
        order_id: i32,
    ) -> Result<ApiResponse<ChargeResponse>, ServiceError>;
    async fn reconcile_payment(
        &self,
        req: &PaymentNotificationRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn sync_payment(
        &self,
        actor: &Actor,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
