use crate::{
    abstract_trait::{
        event::{DynEventCommandRepository, DynEventQueryRepository, EventServiceTrait},
        ticket::DynTicketQueryRepository,
        vendor::DynVendorQueryRepository,
    },
    domain::{
        requests::event::{CreateEventRequest, FindAllEvents, UpdateEventRequest},
        response::event::EventResponse,
    },
    model::Event,
    policy::{Action, Actor, Resource, authorize},
    service::ledger::InventoryLedger,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination, Pagination},
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct EventServiceDeps {
    pub ledger: InventoryLedger,
    pub event_query: DynEventQueryRepository,
    pub event_command: DynEventCommandRepository,
    pub ticket_query: DynTicketQueryRepository,
    pub vendor_query: DynVendorQueryRepository,
}

#[derive(Clone)]
pub struct EventService {
    ledger: InventoryLedger,
    event_query: DynEventQueryRepository,
    event_command: DynEventCommandRepository,
    ticket_query: DynTicketQueryRepository,
    vendor_query: DynVendorQueryRepository,
    tracer: ServiceTracer,
}

impl EventService {
    pub fn new(deps: EventServiceDeps, tracer: ServiceTracer) -> Self {
        let EventServiceDeps {
            ledger,
            event_query,
            event_command,
            ticket_query,
            vendor_query,
        } = deps;

        Self {
            ledger,
            event_query,
            event_command,
            ticket_query,
            vendor_query,
            tracer,
        }
    }

    async fn load(&self, id: i32) -> Result<Event, ServiceError> {
        self.event_query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event"))
    }

    async fn load_owned(&self, actor: &Actor, id: i32) -> Result<Event, ServiceError> {
        let event = self.load(id).await?;
        authorize(
            actor,
            Action::ManageEvent,
            Resource::Event {
                organizer_id: event.organizer_id,
            },
        )?;
        Ok(event)
    }

    async fn create(
        &self,
        actor: &Actor,
        req: &CreateEventRequest,
    ) -> Result<Event, ServiceError> {
        authorize(actor, Action::CreateEvent, Resource::Global)?;

        if req.total_tickets < 1 {
            return Err(ServiceError::InvalidCapacity {
                requested: req.total_tickets,
                issued: 0,
            });
        }
        if req.price < 0 {
            return Err(ServiceError::Validation(vec![
                "price must not be negative".into(),
            ]));
        }

        if let Some(vendor_id) = req.vendor_id {
            if self.vendor_query.find_by_id(vendor_id).await?.is_none() {
                return Err(ServiceError::not_found("Vendor"));
            }
        }

        Ok(self.event_command.create_event(actor.user_id, req).await?)
    }

    async fn update(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateEventRequest,
    ) -> Result<Event, ServiceError> {
        let event = self.load_owned(actor, id).await?;

        if req.price.is_some_and(|p| p < 0) {
            return Err(ServiceError::Validation(vec![
                "price must not be negative".into(),
            ]));
        }

        let resized = match req.total_tickets {
            Some(new_total) if new_total != event.total_tickets => {
                self.ledger.resize_capacity(id, new_total).await?;
                true
            }
            _ => false,
        };

        match self.event_command.update_event(id, req).await {
            Ok(updated) => Ok(updated),
            Err(e) => {
                error!("❌ Failed to update event {id}: {e}");
                if resized {
                    if let Err(undo) = self.ledger.resize_capacity(id, event.total_tickets).await {
                        error!(
                            "❌ Restoring capacity {} on event {id} failed: {undo}",
                            event.total_tickets
                        );
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn delete(&self, actor: &Actor, id: i32) -> Result<(), ServiceError> {
        self.load_owned(actor, id).await?;

        let tickets = self.ticket_query.count_by_event(id).await?;
        if tickets > 0 {
            warn!("⚠️ Refusing to delete event {id}: {tickets} ticket(s) reference it");
            return Err(ServiceError::Conflict(format!(
                "event {id} still has {tickets} ticket(s)"
            )));
        }

        self.event_command.delete_event(id).await?;
        Ok(())
    }
}

#[async_trait]
impl EventServiceTrait for EventService {
    async fn create_event(
        &self,
        actor: &Actor,
        req: &CreateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, ServiceError> {
        info!("🏗️ Creating event '{}' for organizer {}", req.title, actor.user_id);

        let tracing_ctx = self.tracer.start_tracing(
            "CreateEvent",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("event.title", req.title.clone()),
                KeyValue::new("event.total_tickets", req.total_tickets as i64),
            ],
        );

        match self.create(actor, req).await {
            Ok(event) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, Method::Post, "Event created");
                Ok(ApiResponse::success(
                    "Event created successfully",
                    EventResponse::from(event),
                ))
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, Method::Post, &e.to_string());
                Err(e)
            }
        }
    }

    async fn get_event(&self, id: i32) -> Result<ApiResponse<EventResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start_tracing("GetEvent", vec![KeyValue::new("event.id", id as i64)]);

        let result = self
            .load(id)
            .await
            .map(|event| ApiResponse::success("Event retrieved successfully", event.into()));

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Event retrieved");
        result
    }

    async fn list_events(
        &self,
        req: &FindAllEvents,
    ) -> Result<ApiResponsePagination<Vec<EventResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "ListEvents",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("page", req.page as i64),
                KeyValue::new("page_size", req.page_size as i64),
            ],
        );

        let result = match self.event_query.find_published(req).await {
            Ok((events, total)) => {
                let (limit, _) = req.limit_offset();
                Ok(ApiResponsePagination {
                    status: "success".into(),
                    message: "Events retrieved successfully".into(),
                    data: events.into_iter().map(EventResponse::from).collect(),
                    pagination: Pagination::new(req.page.max(1), limit as i32, total),
                })
            }
            Err(e) => Err(ServiceError::from(e)),
        };

        self.tracer
            .complete_with(&tracing_ctx, Method::Get, &result, "Events listed");
        result
    }

    async fn update_event(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateEvent",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("event.id", id as i64),
            ],
        );

        let result = self
            .update(actor, id, req)
            .await
            .map(|event| ApiResponse::success("Event updated successfully", event.into()));

        self.tracer
            .complete_with(&tracing_ctx, Method::Put, &result, "Event updated");
        result
    }

    async fn publish_event(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<EventResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "PublishEvent",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("event.id", id as i64),
            ],
        );

        let result = async {
            self.load_owned(actor, id).await?;
            let event = self.event_command.publish_event(id).await?;
            info!("📢 Event {id} published");
            Ok::<_, ServiceError>(ApiResponse::success(
                "Event published successfully",
                EventResponse::from(event),
            ))
        }
        .await;

        self.tracer
            .complete_with(&tracing_ctx, Method::Put, &result, "Event published");
        result
    }

    async fn delete_event(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteEvent",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("event.id", id as i64),
            ],
        );

        let result = self
            .delete(actor, id)
            .await
            .map(|_| ApiResponse::success("Event deleted successfully", ()));

        self.tracer
            .complete_with(&tracing_ctx, Method::Delete, &result, "Event deleted");
        result
    }
}
