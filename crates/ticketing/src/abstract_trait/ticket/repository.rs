use crate::{
    domain::requests::ticket::UpdateTicketRequest,
    model::{NewOrder, NewTicket, Order, Ticket},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynTicketQueryRepository = Arc<dyn TicketQueryRepositoryTrait + Send + Sync>;
pub type DynTicketCommandRepository = Arc<dyn TicketCommandRepositoryTrait + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CreatedTickets {
    pub tickets: Vec<Ticket>,
    pub order: Option<Order>,
}

#[async_trait]
pub trait TicketQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, RepositoryError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Ticket>, RepositoryError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Ticket>, RepositoryError>;
    async fn find_by_event(&self, event_id: i32) -> Result<Vec<Ticket>, RepositoryError>;
    async fn find_by_event_and_user(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> Result<Vec<Ticket>, RepositoryError>;
    async fn find_all(&self) -> Result<Vec<Ticket>, RepositoryError>;
    /// Tickets of every event organized by `organizer_id`.
    async fn find_by_organizer(&self, organizer_id: i32) -> Result<Vec<Ticket>, RepositoryError>;
    async fn count_by_event(&self, event_id: i32) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait TicketCommandRepositoryTrait {
    /// Writes the whole batch, and the order referencing it when given, or nothing.
    async fn create_tickets(
        &self,
        tickets: &[NewTicket],
        order: Option<&NewOrder>,
    ) -> Result<CreatedTickets, RepositoryError>;

    /// `reserved`/`confirmed` to `used`; `None` if the ticket was in neither state.
    async fn mark_used(&self, id: i32) -> Result<Option<Ticket>, RepositoryError>;

    /// Cancels a non-cancelled ticket and returns its unit to the event, in one unit of work.
    async fn cancel_and_release(&self, id: i32) -> Result<Option<Ticket>, RepositoryError>;

    /// Removes the ticket; a ticket that still held capacity gives its unit back.
    async fn delete_and_release(&self, id: i32) -> Result<Option<Ticket>, RepositoryError>;

    async fn update_details(
        &self,
        id: i32,
        req: &UpdateTicketRequest,
    ) -> Result<Ticket, RepositoryError>;
}
