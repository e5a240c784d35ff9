use crate::{
    abstract_trait::ticket::{CreatedTickets, TicketCommandRepositoryTrait},
    domain::requests::ticket::UpdateTicketRequest,
    model::{NewOrder, NewTicket, Order, Ticket, TicketStatus},
    repository::event::ledger,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct TicketCommandRepository {
    db: ConnectionPool,
}

impl TicketCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TicketCommandRepositoryTrait for TicketCommandRepository {
    async fn create_tickets(
        &self,
        tickets: &[NewTicket],
        order: Option<&NewOrder>,
    ) -> Result<CreatedTickets, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let mut created = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            let row = sqlx::query_as::<_, Ticket>(
                r#"
                INSERT INTO tickets (
                    event_id, user_id, ticket_type, price, status,
                    booking_date, seat_number, code, created_at, updated_at
                )
                VALUES (
                    $1, $2, $3, $4, $5, CURRENT_TIMESTAMP, $6, $7,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP
                )
                RETURNING *
                "#,
            )
            .bind(ticket.event_id)
            .bind(ticket.user_id)
            .bind(ticket.ticket_type.as_str())
            .bind(ticket.price)
            .bind(ticket.status.as_str())
            .bind(&ticket.seat_number)
            .bind(&ticket.code)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to insert ticket: {:?}", e);
                RepositoryError::from(e)
            })?;

            created.push(row);
        }

        let order = match order {
            Some(order) => {
                let ids: Vec<i32> = created.iter().map(|t| t.ticket_id).collect();

                let row = sqlx::query_as::<_, Order>(
                    r#"
                    INSERT INTO orders (
                        user_id, ticket_ids, total_amount, payment_status,
                        payment_method, created_at, updated_at
                    )
                    VALUES ($1, $2, $3, $4, $5, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
                    RETURNING *
                    "#,
                )
                .bind(order.user_id)
                .bind(ids)
                .bind(order.total_amount)
                .bind(order.payment_status.as_str())
                .bind(order.payment_method.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    error!("❌ Failed to insert order: {:?}", e);
                    RepositoryError::from(e)
                })?;

                Some(row)
            }
            None => None,
        };

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("✅ Stored {} ticket(s)", created.len());
        Ok(CreatedTickets {
            tickets: created,
            order,
        })
    }

    async fn mark_used(&self, id: i32) -> Result<Option<Ticket>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE ticket_id = $1
              AND status IN ($3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(TicketStatus::Used.as_str())
        .bind(TicketStatus::Reserved.as_str())
        .bind(TicketStatus::Confirmed.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn cancel_and_release(&self, id: i32) -> Result<Option<Ticket>, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE ticket_id = $1
              AND status <> $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(TicketStatus::Cancelled.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        let Some(ticket) = ticket else {
            return Ok(None);
        };

        ledger::increment(&mut *tx, ticket.event_id, 1).await?;
        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(Some(ticket))
    }

    async fn delete_and_release(&self, id: i32) -> Result<Option<Ticket>, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let ticket =
            sqlx::query_as::<_, Ticket>("DELETE FROM tickets WHERE ticket_id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;

        let Some(ticket) = ticket else {
            return Ok(None);
        };

        if ticket.status.holds_capacity() {
            ledger::increment(&mut *tx, ticket.event_id, 1).await?;
        }
        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(Some(ticket))
    }

    async fn update_details(
        &self,
        id: i32,
        req: &UpdateTicketRequest,
    ) -> Result<Ticket, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET ticket_type = COALESCE($2, ticket_type),
                seat_number = COALESCE($3, seat_number),
                updated_at = CURRENT_TIMESTAMP
            WHERE ticket_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.ticket_type.map(|t| t.as_str()))
        .bind(&req.seat_number)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }
}
