use crate::{abstract_trait::event::InventoryRepositoryTrait, model::Event};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::PgConnection;
use tracing::error;

/// Capacity counters, written only through single conditional statements.
pub struct InventoryRepository {
    db: ConnectionPool,
}

impl InventoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

pub(crate) async fn decrement(
    conn: &mut PgConnection,
    event_id: i32,
    quantity: i32,
    require_published: bool,
) -> Result<Option<Event>, RepositoryError> {
    sqlx::query_as::<_, Event>(
        r#"
        UPDATE events
        SET available_tickets = available_tickets - $2,
            updated_at = CURRENT_TIMESTAMP
        WHERE event_id = $1
          AND available_tickets >= $2
          AND (NOT $3 OR is_published)
        RETURNING *
        "#,
    )
    .bind(event_id)
    .bind(quantity)
    .bind(require_published)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        error!("❌ Failed to decrement capacity of event {event_id}: {:?}", e);
        RepositoryError::from(e)
    })
}

pub(crate) async fn increment(
    conn: &mut PgConnection,
    event_id: i32,
    quantity: i32,
) -> Result<Option<Event>, RepositoryError> {
    sqlx::query_as::<_, Event>(
        r#"
        UPDATE events
        SET available_tickets = LEAST(available_tickets + $2, total_tickets),
            updated_at = CURRENT_TIMESTAMP
        WHERE event_id = $1
        RETURNING *
        "#,
    )
    .bind(event_id)
    .bind(quantity)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        error!("❌ Failed to release capacity of event {event_id}: {:?}", e);
        RepositoryError::from(e)
    })
}

#[async_trait]
impl InventoryRepositoryTrait for InventoryRepository {
    async fn decrement_available(
        &self,
        event_id: i32,
        quantity: i32,
        require_published: bool,
    ) -> Result<Option<Event>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        decrement(&mut *conn, event_id, quantity, require_published).await
    }

    async fn increment_available(
        &self,
        event_id: i32,
        quantity: i32,
    ) -> Result<Option<Event>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        increment(&mut *conn, event_id, quantity).await
    }

    async fn resize_capacity(
        &self,
        event_id: i32,
        new_total: i32,
    ) -> Result<Option<Event>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Right-hand sides see the pre-update row.
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET available_tickets = $2 - (total_tickets - available_tickets),
                total_tickets = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE event_id = $1
              AND total_tickets - available_tickets <= $2
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(new_total)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to resize event {event_id}: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
