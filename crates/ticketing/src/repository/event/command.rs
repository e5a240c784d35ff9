use crate::{
    abstract_trait::event::EventCommandRepositoryTrait,
    domain::requests::event::{CreateEventRequest, UpdateEventRequest},
    model::{Event, EventStatus},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct EventCommandRepository {
    db: ConnectionPool,
}

impl EventCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventCommandRepositoryTrait for EventCommandRepository {
    async fn create_event(
        &self,
        organizer_id: i32,
        req: &CreateEventRequest,
    ) -> Result<Event, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                title, description, starts_at, location, category, event_type,
                total_tickets, available_tickets, price, organizer_id, vendor_id,
                image_url, is_published, status, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $7, $8, $9, $10, $11, FALSE, $12,
                CURRENT_TIMESTAMP, CURRENT_TIMESTAMP
            )
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.starts_at)
        .bind(&req.location)
        .bind(req.category.as_str())
        .bind(req.event_type.as_str())
        .bind(req.total_tickets)
        .bind(req.price)
        .bind(organizer_id)
        .bind(req.vendor_id)
        .bind(&req.image_url)
        .bind(EventStatus::Draft.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert event: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Event created: id={}", event.event_id);
        Ok(event)
    }

    async fn update_event(
        &self,
        id: i32,
        req: &UpdateEventRequest,
    ) -> Result<Event, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                starts_at = COALESCE($4, starts_at),
                location = COALESCE($5, location),
                category = COALESCE($6, category),
                event_type = COALESCE($7, event_type),
                price = COALESCE($8, price),
                image_url = COALESCE($9, image_url),
                updated_at = CURRENT_TIMESTAMP
            WHERE event_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.starts_at)
        .bind(&req.location)
        .bind(req.category.map(|c| c.as_str()))
        .bind(req.event_type.map(|t| t.as_str()))
        .bind(req.price)
        .bind(&req.image_url)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(event)
    }

    async fn publish_event(&self, id: i32) -> Result<Event, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET is_published = TRUE,
                status = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE event_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(EventStatus::Published.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(event)
    }

    async fn delete_event(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| match RepositoryError::from(e) {
                RepositoryError::ForeignKey(_) => {
                    RepositoryError::Conflict("event still has tickets".into())
                }
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
