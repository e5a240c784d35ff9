use crate::{
    abstract_trait::order::OrderCommandRepositoryTrait,
    model::{Order, PaymentStatus},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn attach_charge(
        &self,
        id: i32,
        transaction_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET transaction_id = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $1 AND payment_status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(transaction_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to attach charge to order {id}: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn settle_payment(
        &self,
        id: i32,
        transaction_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET payment_status = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $1 AND transaction_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(transaction_id)
        .bind(status.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to settle payment for order {id}: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
