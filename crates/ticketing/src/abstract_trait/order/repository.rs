use crate::model::{Order, PaymentStatus};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Pins a gateway charge to a pending order. `None` if the order is not pending.
    async fn attach_charge(
        &self,
        id: i32,
        transaction_id: &str,
    ) -> Result<Option<Order>, RepositoryError>;

    /// Sets the payment status, but only on the order holding `transaction_id`.
    async fn settle_payment(
        &self,
        id: i32,
        transaction_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<Order>, RepositoryError>;
}
