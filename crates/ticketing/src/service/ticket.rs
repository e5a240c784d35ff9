use crate::{
    abstract_trait::{
        event::DynEventQueryRepository,
        ticket::{DynTicketCommandRepository, DynTicketQueryRepository, TicketServiceTrait},
    },
    domain::{
        requests::ticket::{IssueTicketsRequest, UpdateTicketRequest},
        response::ticket::TicketResponse,
    },
    model::{NewTicket, Ticket, TicketStatus},
    policy::{Action, Actor, Resource, RosterScope, authorize, roster_scope},
    service::ledger::InventoryLedger,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer, generate_ticket_code},
};
use tracing::{error, info};

pub const MAX_ISSUE_QUANTITY: i32 = 100;

#[derive(Clone)]
pub struct TicketServiceDeps {
    pub ledger: InventoryLedger,
    pub event_query: DynEventQueryRepository,
    pub ticket_query: DynTicketQueryRepository,
    pub ticket_command: DynTicketCommandRepository,
}

/// Ticket lifecycle: issuance, check-in, cancellation, deletion and lookups.
#[derive(Clone)]
pub struct TicketService {
    ledger: InventoryLedger,
    event_query: DynEventQueryRepository,
    ticket_query: DynTicketQueryRepository,
    ticket_command: DynTicketCommandRepository,
    tracer: ServiceTracer,
}

fn responses(tickets: Vec<Ticket>) -> Vec<TicketResponse> {
    tickets.into_iter().map(TicketResponse::from).collect()
}

impl TicketService {
    pub fn new(deps: TicketServiceDeps, tracer: ServiceTracer) -> Self {
        let TicketServiceDeps {
            ledger,
            event_query,
            ticket_query,
            ticket_command,
        } = deps;

        Self {
            ledger,
            event_query,
            ticket_query,
            ticket_command,
            tracer,
        }
    }

    async fn organizer_of(&self, event_id: i32) -> Result<i32, ServiceError> {
        self.event_query
            .find_by_id(event_id)
            .await?
            .map(|e| e.organizer_id)
            .ok_or_else(|| ServiceError::not_found("Event"))
    }

    async fn load(&self, id: i32) -> Result<(Ticket, Resource), ServiceError> {
        let ticket = self
            .ticket_query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket"))?;
        let organizer_id = self.organizer_of(ticket.event_id).await?;

        let resource = Resource::Ticket {
            owner_id: ticket.user_id,
            organizer_id,
        };
        Ok((ticket, resource))
    }

    async fn issue(
        &self,
        actor: &Actor,
        req: &IssueTicketsRequest,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError> {
        if !(1..=MAX_ISSUE_QUANTITY).contains(&req.quantity) {
            return Err(ServiceError::QuantityOutOfRange {
                quantity: req.quantity,
                max: MAX_ISSUE_QUANTITY,
            });
        }
        if req.seat_number.is_some() && req.quantity != 1 {
            return Err(ServiceError::Validation(vec![
                "seat_number can only be set when issuing a single ticket".into(),
            ]));
        }

        let event = self
            .event_query
            .find_by_id(req.event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event"))?;

        authorize(
            actor,
            Action::IssueTickets,
            Resource::Event {
                organizer_id: event.organizer_id,
            },
        )?;

        let price = req.price.unwrap_or(event.price);
        if price < 0 {
            return Err(ServiceError::Validation(vec![
                "price must not be negative".into(),
            ]));
        }
        let codes = (0..req.quantity)
            .map(|_| generate_ticket_code())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ServiceError::Internal(format!("ticket code generation failed: {e}")))?;

        self.ledger
            .allocate_capacity(req.event_id, req.quantity)
            .await?;

        let tickets: Vec<NewTicket> = codes
            .into_iter()
            .map(|code| NewTicket {
                event_id: req.event_id,
                user_id: actor.user_id,
                ticket_type: req.ticket_type,
                price,
                status: TicketStatus::Reserved,
                seat_number: req.seat_number.clone(),
                code,
            })
            .collect();

        let created = match self.ticket_command.create_tickets(&tickets, None).await {
            Ok(created) => created,
            Err(e) => {
                error!("❌ Failed to store issued tickets for event {}: {e}", req.event_id);
                if let Err(release) = self
                    .ledger
                    .release_capacity(req.event_id, req.quantity)
                    .await
                {
                    error!("❌ Compensating release on event {} failed: {release}", req.event_id);
                }
                return Err(e.into());
            }
        };

        Ok(ApiResponse::success(
            format!("{} ticket(s) issued successfully", created.tickets.len()),
            responses(created.tickets),
        ))
    }

    async fn cancel(&self, actor: &Actor, id: i32) -> Result<Ticket, ServiceError> {
        let (ticket, resource) = self.load(id).await?;
        authorize(actor, Action::CancelTicket, resource)?;
        ticket.status.cancel()?;

        if let Some(cancelled) = self.ticket_command.cancel_and_release(id).await? {
            return Ok(cancelled);
        }

        // Lost a race with another cancel or a delete; report what won.
        let current = self
            .ticket_query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket"))?;
        current.status.cancel()?;
        Err(ServiceError::Internal(format!(
            "cancellation of ticket {id} did not apply"
        )))
    }

    async fn check_in_ticket(&self, actor: &Actor, id: i32) -> Result<Ticket, ServiceError> {
        let (ticket, resource) = self.load(id).await?;
        authorize(actor, Action::CheckInTicket, resource)?;
        ticket.status.check_in()?;

        if let Some(used) = self.ticket_command.mark_used(id).await? {
            return Ok(used);
        }

        // Lost a race with another transition; report the state that won.
        let current = self
            .ticket_query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket"))?;
        current.status.check_in()?;
        Err(ServiceError::Internal(format!(
            "check-in of ticket {id} did not apply"
        )))
    }
}

#[async_trait]
impl TicketServiceTrait for TicketService {
    async fn issue_tickets(
        &self,
        actor: &Actor,
        req: &IssueTicketsRequest,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError> {
        info!(
            "🏗️ Issuing {} ticket(s) on event {} by user {}",
            req.quantity, req.event_id, actor.user_id
        );

        let tracing_ctx = self.tracer.start_tracing(
            "IssueTickets",
            vec![
                KeyValue::new("component", "ticket"),
                KeyValue::new("event.id", req.event_id as i64),
                KeyValue::new("issue.quantity", req.quantity as i64),
            ],
        );

        let result = self.issue(actor, req).await;
        self.tracer
            .complete_with(&tracing_ctx, Method::Post, &result, "Tickets issued");
        result
    }

    async fn cancel_ticket(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "CancelTicket",
            vec![
                KeyValue::new("component", "ticket"),
                KeyValue::new("ticket.id", id as i64),
            ],
        );

        match self.cancel(actor, id).await {
            Ok(ticket) => {
                info!("🗑️ Ticket {id} cancelled, one unit returned to event {}", ticket.event_id);
                self.tracer
                    .complete_tracing_success(&tracing_ctx, Method::Put, "Ticket cancelled");
                Ok(ApiResponse::success(
                    "Ticket cancelled successfully",
                    TicketResponse::from(ticket),
                ))
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, Method::Put, &e.to_string());
                Err(e)
            }
        }
    }

    async fn check_in(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "CheckInTicket",
            vec![
                KeyValue::new("component", "ticket"),
                KeyValue::new("ticket.id", id as i64),
            ],
        );

        let result = self
            .check_in_ticket(actor, id)
            .await
            .map(|ticket| ApiResponse::success("Ticket checked in", TicketResponse::from(ticket)));

        self.tracer
            .complete_with(&tracing_ctx, Method::Put, &result, "Ticket checked in");
        result
    }

    async fn delete_ticket(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteTicket",
            vec![
                KeyValue::new("component", "ticket"),
                KeyValue::new("ticket.id", id as i64),
            ],
        );

        let result = async {
            let (_, resource) = self.load(id).await?;
            authorize(actor, Action::DeleteTicket, resource)?;

            let deleted = self
                .ticket_command
                .delete_and_release(id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Ticket"))?;

            info!(
                "🗑️ Ticket {id} deleted (was {}), event {}",
                deleted.status, deleted.event_id
            );
            Ok::<_, ServiceError>(ApiResponse::success("Ticket deleted successfully", ()))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Delete, &result, "Ticket deleted");
        result
    }

    async fn get_ticket(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start_tracing("GetTicket", vec![KeyValue::new("ticket.id", id as i64)]);

        let result = async {
            let (ticket, resource) = self.load(id).await?;
            authorize(actor, Action::ViewTicket, resource)?;
            Ok::<_, ServiceError>(ApiResponse::success(
                "Ticket retrieved successfully",
                TicketResponse::from(ticket),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Ticket retrieved");
        result
    }

    async fn get_ticket_by_code(
        &self,
        actor: &Actor,
        code: &str,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start_tracing("GetTicketByCode", vec![KeyValue::new("component", "ticket")]);

        let result = async {
            let ticket = self
                .ticket_query
                .find_by_code(code)
                .await?
                .ok_or_else(|| ServiceError::not_found("Ticket"))?;
            let organizer_id = self.organizer_of(ticket.event_id).await?;

            authorize(
                actor,
                Action::ScanTicket,
                Resource::Ticket {
                    owner_id: ticket.user_id,
                    organizer_id,
                },
            )?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Ticket retrieved successfully",
                TicketResponse::from(ticket),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Ticket code resolved");
        result
    }

    async fn update_ticket(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateTicketRequest,
    ) -> Result<ApiResponse<TicketResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateTicket",
            vec![
                KeyValue::new("component", "ticket"),
                KeyValue::new("ticket.id", id as i64),
            ],
        );

        let result = async {
            let (_, resource) = self.load(id).await?;
            authorize(actor, Action::UpdateTicket, resource)?;

            let ticket = self.ticket_command.update_details(id, req).await?;
            Ok::<_, ServiceError>(ApiResponse::success(
                "Ticket updated successfully",
                TicketResponse::from(ticket),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Put, &result, "Ticket updated");
        result
    }

    async fn list_user_tickets(
        &self,
        actor: &Actor,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "ListUserTickets",
            vec![KeyValue::new("user.id", user_id as i64)],
        );

        let result = async {
            authorize(actor, Action::ViewUserTickets, Resource::UserTickets { user_id })?;
            let tickets = self.ticket_query.find_by_user(user_id).await?;
            Ok::<_, ServiceError>(ApiResponse::success(
                "Tickets retrieved successfully",
                responses(tickets),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "User tickets listed");
        result
    }

    async fn list_event_tickets(
        &self,
        actor: &Actor,
        event_id: i32,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "ListEventTickets",
            vec![KeyValue::new("event.id", event_id as i64)],
        );

        let result = async {
            let organizer_id = self.organizer_of(event_id).await?;
            let own = self
                .ticket_query
                .find_by_event_and_user(event_id, actor.user_id)
                .await?;

            let resource = Resource::EventRoster {
                organizer_id,
                holds_ticket: !own.is_empty(),
            };
            authorize(actor, Action::ViewEventRoster, resource)?;

            let tickets = match roster_scope(actor, resource) {
                Some(RosterScope::Full) => self.ticket_query.find_by_event(event_id).await?,
                _ => own,
            };

            Ok::<_, ServiceError>(ApiResponse::success(
                "Tickets retrieved successfully",
                responses(tickets),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Event roster listed");
        result
    }

    async fn list_all_tickets(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<TicketResponse>>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start_tracing("ListAllTickets", vec![KeyValue::new("component", "ticket")]);

        let result = async {
            authorize(actor, Action::ListAllTickets, Resource::Global)?;
            let tickets = if actor.is_admin() {
                self.ticket_query.find_all().await?
            } else {
                self.ticket_query.find_by_organizer(actor.user_id).await?
            };
            Ok::<_, ServiceError>(ApiResponse::success(
                "Tickets retrieved successfully",
                responses(tickets),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "All tickets listed");
        result
    }
}
