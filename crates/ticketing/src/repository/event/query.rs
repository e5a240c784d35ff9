use crate::{
    abstract_trait::event::EventQueryRepositoryTrait, domain::requests::event::FindAllEvents,
    model::Event,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct EventQueryRepository {
    db: ConnectionPool,
}

impl EventQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventQueryRepositoryTrait for EventQueryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Event>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE event_id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch event {id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(event)
    }

    async fn find_published(
        &self,
        req: &FindAllEvents,
    ) -> Result<(Vec<Event>, i64), RepositoryError> {
        info!(
            "🔍 Fetching published events category={:?} location={:?}",
            req.category, req.location
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let (limit, offset) = req.limit_offset();
        let category = req.category.map(|c| c.as_str());
        let location = req
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        const FILTER: &str = r#"
            WHERE is_published
            AND ($1::TEXT IS NULL OR category = $1)
            AND ($2::TEXT IS NULL OR location ILIKE '%' || $2 || '%')
            AND ($3::TIMESTAMP IS NULL OR starts_at >= $3)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM events {FILTER}"))
            .bind(category)
            .bind(location)
            .bind(req.from_date)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count events: {:?}", e);
                RepositoryError::from(e)
            })?;

        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT * FROM events {FILTER} ORDER BY starts_at ASC, event_id ASC LIMIT $4 OFFSET $5"
        ))
        .bind(category)
        .bind(location)
        .bind(req.from_date)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch events: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok((events, total))
    }
}
