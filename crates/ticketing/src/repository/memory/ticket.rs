use super::{MemoryStore, now};
use crate::{
    abstract_trait::ticket::{
        CreatedTickets, TicketCommandRepositoryTrait, TicketQueryRepositoryTrait,
    },
    domain::requests::ticket::UpdateTicketRequest,
    model::{NewOrder, NewTicket, Order, Ticket, TicketStatus},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{cmp::Reverse, collections::HashSet};

#[async_trait]
impl TicketQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, RepositoryError> {
        Ok(self.lock()?.tickets.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Ticket>, RepositoryError> {
        Ok(self
            .lock()?
            .tickets
            .values()
            .find(|t| t.code == code)
            .cloned())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Ticket>, RepositoryError> {
        let mut tickets: Vec<Ticket> = self
            .lock()?
            .tickets
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tickets.sort_by_key(|t| Reverse((t.booking_date, t.ticket_id)));
        Ok(tickets)
    }

    async fn find_by_event(&self, event_id: i32) -> Result<Vec<Ticket>, RepositoryError> {
        Ok(self
            .lock()?
            .tickets
            .values()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn find_by_event_and_user(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> Result<Vec<Ticket>, RepositoryError> {
        Ok(self
            .lock()?
            .tickets
            .values()
            .filter(|t| t.event_id == event_id && t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        let mut tickets: Vec<Ticket> = self.lock()?.tickets.values().cloned().collect();
        tickets.sort_by_key(|t| Reverse((t.booking_date, t.ticket_id)));
        Ok(tickets)
    }

    async fn find_by_organizer(&self, organizer_id: i32) -> Result<Vec<Ticket>, RepositoryError> {
        let state = self.lock()?;
        let mut tickets: Vec<Ticket> = state
            .tickets
            .values()
            .filter(|t| {
                state
                    .events
                    .get(&t.event_id)
                    .is_some_and(|e| e.organizer_id == organizer_id)
            })
            .cloned()
            .collect();
        tickets.sort_by_key(|t| Reverse((t.booking_date, t.ticket_id)));
        Ok(tickets)
    }

    async fn count_by_event(&self, event_id: i32) -> Result<i64, RepositoryError> {
        Ok(self
            .lock()?
            .tickets
            .values()
            .filter(|t| t.event_id == event_id)
            .count() as i64)
    }
}

#[async_trait]
impl TicketCommandRepositoryTrait for MemoryStore {
    async fn create_tickets(
        &self,
        tickets: &[NewTicket],
        order: Option<&NewOrder>,
    ) -> Result<CreatedTickets, RepositoryError> {
        let mut state = self.lock()?;

        // Validate the whole batch before writing any of it.
        let mut codes: HashSet<&str> = state.tickets.values().map(|t| t.code.as_str()).collect();
        for ticket in tickets {
            if !state.events.contains_key(&ticket.event_id) {
                return Err(RepositoryError::ForeignKey(format!(
                    "event {} does not exist",
                    ticket.event_id
                )));
            }
            if !codes.insert(ticket.code.as_str()) {
                return Err(RepositoryError::AlreadyExists(format!(
                    "ticket code {} already issued",
                    ticket.code
                )));
            }
        }
        drop(codes);

        let stamp = now();
        let mut created = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            let id = state.next_id();
            let row = Ticket {
                ticket_id: id,
                event_id: ticket.event_id,
                user_id: ticket.user_id,
                ticket_type: ticket.ticket_type,
                price: ticket.price,
                status: ticket.status,
                booking_date: stamp,
                seat_number: ticket.seat_number.clone(),
                code: ticket.code.clone(),
                created_at: Some(stamp),
                updated_at: Some(stamp),
            };
            state.tickets.insert(id, row.clone());
            created.push(row);
        }

        let order = order.map(|order| {
            let id = state.next_id();
            let row = Order {
                order_id: id,
                user_id: order.user_id,
                ticket_ids: created.iter().map(|t| t.ticket_id).collect(),
                total_amount: order.total_amount,
                payment_status: order.payment_status,
                payment_method: order.payment_method,
                transaction_id: None,
                created_at: Some(stamp),
                updated_at: Some(stamp),
            };
            state.orders.insert(id, row.clone());
            row
        });

        Ok(CreatedTickets {
            tickets: created,
            order,
        })
    }

    async fn mark_used(&self, id: i32) -> Result<Option<Ticket>, RepositoryError> {
        let mut state = self.lock()?;

        let Some(ticket) = state.tickets.get_mut(&id) else {
            return Ok(None);
        };
        if !matches!(
            ticket.status,
            TicketStatus::Reserved | TicketStatus::Confirmed
        ) {
            return Ok(None);
        }

        ticket.status = TicketStatus::Used;
        ticket.updated_at = Some(now());
        Ok(Some(ticket.clone()))
    }

    async fn cancel_and_release(&self, id: i32) -> Result<Option<Ticket>, RepositoryError> {
        let mut state = self.lock()?;

        let Some(ticket) = state.tickets.get_mut(&id) else {
            return Ok(None);
        };
        if ticket.status == TicketStatus::Cancelled {
            return Ok(None);
        }

        ticket.status = TicketStatus::Cancelled;
        ticket.updated_at = Some(now());
        let ticket = ticket.clone();
        state.release(ticket.event_id, 1);

        Ok(Some(ticket))
    }

    async fn delete_and_release(&self, id: i32) -> Result<Option<Ticket>, RepositoryError> {
        let mut state = self.lock()?;

        let Some(ticket) = state.tickets.remove(&id) else {
            return Ok(None);
        };
        if ticket.status.holds_capacity() {
            state.release(ticket.event_id, 1);
        }

        Ok(Some(ticket))
    }

    async fn update_details(
        &self,
        id: i32,
        req: &UpdateTicketRequest,
    ) -> Result<Ticket, RepositoryError> {
        let mut state = self.lock()?;
        let ticket = state.tickets.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        if let Some(ticket_type) = req.ticket_type {
            ticket.ticket_type = ticket_type;
        }
        if let Some(seat_number) = &req.seat_number {
            ticket.seat_number = Some(seat_number.clone());
        }
        ticket.updated_at = Some(now());

        Ok(ticket.clone())
    }
}
