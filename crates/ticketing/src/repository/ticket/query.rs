use crate::{abstract_trait::ticket::TicketQueryRepositoryTrait, model::Ticket};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct TicketQueryRepository {
    db: ConnectionPool,
}

impl TicketQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn fetch_list(&self, sql: &str, bind: Vec<i32>) -> Result<Vec<Ticket>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let mut query = sqlx::query_as::<_, Ticket>(sql);
        for value in bind {
            query = query.bind(value);
        }

        query.fetch_all(&mut *conn).await.map_err(|e| {
            error!("❌ Failed to fetch tickets: {:?}", e);
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl TicketQueryRepositoryTrait for TicketQueryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE ticket_id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Ticket>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE code = $1")
            .bind(code)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Ticket>, RepositoryError> {
        self.fetch_list(
            "SELECT * FROM tickets WHERE user_id = $1 ORDER BY booking_date DESC, ticket_id DESC",
            vec![user_id],
        )
        .await
    }

    async fn find_by_event(&self, event_id: i32) -> Result<Vec<Ticket>, RepositoryError> {
        self.fetch_list(
            "SELECT * FROM tickets WHERE event_id = $1 ORDER BY ticket_id ASC",
            vec![event_id],
        )
        .await
    }

    async fn find_by_event_and_user(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> Result<Vec<Ticket>, RepositoryError> {
        self.fetch_list(
            "SELECT * FROM tickets WHERE event_id = $1 AND user_id = $2 ORDER BY ticket_id ASC",
            vec![event_id, user_id],
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        self.fetch_list(
            "SELECT * FROM tickets ORDER BY booking_date DESC, ticket_id DESC",
            vec![],
        )
        .await
    }

    async fn find_by_organizer(&self, organizer_id: i32) -> Result<Vec<Ticket>, RepositoryError> {
        self.fetch_list(
            r#"
            SELECT t.* FROM tickets t
            JOIN events e ON e.event_id = t.event_id
            WHERE e.organizer_id = $1
            ORDER BY t.booking_date DESC, t.ticket_id DESC
            "#,
            vec![organizer_id],
        )
        .await
    }

    async fn count_by_event(&self, event_id: i32) -> Result<i64, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }
}
