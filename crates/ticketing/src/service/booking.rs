use crate::{
    abstract_trait::{
        order::DynPaymentService,
        ticket::{BookingServiceTrait, DynTicketCommandRepository},
    },
    domain::{requests::ticket::BookTicketRequest, response::ticket::BookingResponse},
    model::{NewTicket, TicketStatus},
    policy::Actor,
    service::{ledger::InventoryLedger, order::OrderAggregator},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    config::PaymentPolicy,
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer, generate_ticket_code},
};
use tracing::{error, info, warn};

pub const MAX_BOOKING_QUANTITY: i32 = 10;

#[derive(Clone)]
pub struct BookingServiceDeps {
    pub ledger: InventoryLedger,
    pub ticket_command: DynTicketCommandRepository,
    pub payment: DynPaymentService,
    pub payment_policy: PaymentPolicy,
}

/// Consumer booking: reserve capacity, then write tickets and order together.
#[derive(Clone)]
pub struct BookingService {
    ledger: InventoryLedger,
    ticket_command: DynTicketCommandRepository,
    payment: DynPaymentService,
    payment_policy: PaymentPolicy,
    tracer: ServiceTracer,
}

impl BookingService {
    pub fn new(deps: BookingServiceDeps, tracer: ServiceTracer) -> Self {
        let BookingServiceDeps {
            ledger,
            ticket_command,
            payment,
            payment_policy,
        } = deps;

        Self {
            ledger,
            ticket_command,
            payment,
            payment_policy,
            tracer,
        }
    }

    async fn book(
        &self,
        actor: &Actor,
        req: &BookTicketRequest,
    ) -> Result<ApiResponse<BookingResponse>, ServiceError> {
        if !(1..=MAX_BOOKING_QUANTITY).contains(&req.quantity) {
            return Err(ServiceError::QuantityOutOfRange {
                quantity: req.quantity,
                max: MAX_BOOKING_QUANTITY,
            });
        }

        let codes = (0..req.quantity)
            .map(|_| generate_ticket_code())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ServiceError::Internal(format!("ticket code generation failed: {e}")))?;

        let reservation = self
            .ledger
            .reserve_capacity(req.event_id, req.quantity)
            .await?;
        let unit_price = reservation.event.price;

        let tickets: Vec<NewTicket> = codes
            .into_iter()
            .map(|code| NewTicket {
                event_id: req.event_id,
                user_id: actor.user_id,
                ticket_type: req.ticket_type,
                price: unit_price,
                status: TicketStatus::Confirmed,
                seat_number: None,
                code,
            })
            .collect();

        let stored = match OrderAggregator::build_order(
            actor.user_id,
            &tickets,
            unit_price,
            req.payment_method,
            self.payment_policy,
        ) {
            Ok(order) => self.ticket_command.create_tickets(&tickets, Some(&order)).await,
            Err(e) => {
                self.compensate(req.event_id, req.quantity).await;
                return Err(e);
            }
        };

        let created = match stored {
            Ok(created) => created,
            Err(e) => {
                error!("❌ Failed to store booking for event {}: {e}", req.event_id);
                self.compensate(req.event_id, req.quantity).await;
                return Err(e.into());
            }
        };

        let order = created.order.ok_or_else(|| {
            ServiceError::Internal("booking stored without its order".into())
        })?;

        // Charge only after commit; a gateway outage leaves a pending order to pay later.
        let charge = if self.payment_policy == PaymentPolicy::AwaitGateway {
            match self.payment.create_charge(actor, order.order_id).await {
                Ok(response) => Some(response.data),
                Err(e) => {
                    warn!("⚠️ Charge for order {} not created: {e}", order.order_id);
                    None
                }
            }
        } else {
            None
        };

        let message = format!("{} ticket(s) booked successfully", req.quantity);
        Ok(ApiResponse::success(
            message,
            BookingResponse {
                ticket_ids: created.tickets.iter().map(|t| t.ticket_id).collect(),
                order_id: order.order_id,
                total_amount: order.total_amount,
                payment_status: order.payment_status,
                available_before: reservation.available_before,
                charge,
            },
        ))
    }

    async fn compensate(&self, event_id: i32, quantity: i32) {
        if let Err(e) = self.ledger.release_capacity(event_id, quantity).await {
            error!("❌ Compensating release of {quantity} on event {event_id} failed: {e}");
        }
    }
}

#[async_trait]
impl BookingServiceTrait for BookingService {
    async fn book_tickets(
        &self,
        actor: &Actor,
        req: &BookTicketRequest,
    ) -> Result<ApiResponse<BookingResponse>, ServiceError> {
        info!(
            "🎟️ Booking {} ticket(s) on event {} for user {}",
            req.quantity, req.event_id, actor.user_id
        );

        let tracing_ctx = self.tracer.start_tracing(
            "BookTickets",
            vec![
                KeyValue::new("component", "booking"),
                KeyValue::new("event.id", req.event_id as i64),
                KeyValue::new("booking.quantity", req.quantity as i64),
            ],
        );

        let result = self.book(actor, req).await;
        self.tracer
            .complete_with(&tracing_ctx, Method::Post, &result, "Tickets booked");
        result
    }
}
