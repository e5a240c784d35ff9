use super::{MemoryStore, now};
use crate::{
    abstract_trait::order::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    model::{Order, PaymentStatus},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::cmp::Reverse;

#[async_trait]
impl OrderQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self.lock()?.orders.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .lock()?
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| Reverse((o.created_at, o.order_id)));
        Ok(orders)
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for MemoryStore {
    async fn attach_charge(
        &self,
        id: i32,
        transaction_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(order) = state
            .orders
            .get_mut(&id)
            .filter(|o| o.payment_status == PaymentStatus::Pending)
        else {
            return Ok(None);
        };

        order.transaction_id = Some(transaction_id.to_string());
        order.updated_at = Some(now());
        Ok(Some(order.clone()))
    }

    async fn settle_payment(
        &self,
        id: i32,
        transaction_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(order) = state
            .orders
            .get_mut(&id)
            .filter(|o| o.transaction_id.as_deref() == Some(transaction_id))
        else {
            return Ok(None);
        };

        order.payment_status = status;
        order.updated_at = Some(now());
        Ok(Some(order.clone()))
    }
}
