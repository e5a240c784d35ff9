use crate::{
    abstract_trait::{
        event::DynEventService,
        order::{DynOrderService, DynPaymentService},
        payment::DynPaymentGateway,
        ticket::{DynBookingService, DynTicketService},
        user::DynIdentityService,
        vendor::DynVendorService,
    },
    repository::Repositories,
    service::{
        BookingService, BookingServiceDeps, EventService, EventServiceDeps, IdentityService,
        IdentityServiceDeps, InventoryLedger, OrderService, PaymentService, PaymentServiceDeps,
        TicketService, TicketServiceDeps, VendorService,
    },
};
use anyhow::Result;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::PaymentPolicy,
    utils::{Metrics, ServiceTracer},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub identity: DynIdentityService,
    pub event: DynEventService,
    pub booking: DynBookingService,
    pub ticket: DynTicketService,
    pub order: DynOrderService,
    pub payment: DynPaymentService,
    pub vendor: DynVendorService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("identity", &"DynIdentityService")
            .field("event", &"DynEventService")
            .field("booking", &"DynBookingService")
            .field("ticket", &"DynTicketService")
            .field("order", &"DynOrderService")
            .field("payment", &"DynPaymentService")
            .field("vendor", &"DynVendorService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repos: Repositories,
    pub hashing: DynHashing,
    pub jwt: DynJwtService,
    pub gateway: DynPaymentGateway,
    pub payment_policy: PaymentPolicy,
}

fn tracer_for(registry: &mut Registry, service: &'static str) -> ServiceTracer {
    let metrics = Metrics::new();
    metrics.register(registry, service);
    ServiceTracer::new(service, metrics)
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps {
            repos,
            hashing,
            jwt,
            gateway,
            payment_policy,
        } = deps;

        let ledger = InventoryLedger::new(repos.event_query.clone(), repos.inventory.clone());

        let identity: DynIdentityService = Arc::new(IdentityService::new(
            IdentityServiceDeps {
                query: repos.user_query.clone(),
                command: repos.user_command.clone(),
                hashing,
                jwt,
            },
            tracer_for(registry, "identity_service"),
        ));

        let payment: DynPaymentService = Arc::new(PaymentService::new(
            PaymentServiceDeps {
                order_query: repos.order_query.clone(),
                order_command: repos.order_command.clone(),
                user_query: repos.user_query.clone(),
                gateway,
            },
            tracer_for(registry, "payment_service"),
        ));

        let event: DynEventService = Arc::new(EventService::new(
            EventServiceDeps {
                ledger: ledger.clone(),
                event_query: repos.event_query.clone(),
                event_command: repos.event_command.clone(),
                ticket_query: repos.ticket_query.clone(),
                vendor_query: repos.vendor_query.clone(),
            },
            tracer_for(registry, "event_service"),
        ));

        let booking: DynBookingService = Arc::new(BookingService::new(
            BookingServiceDeps {
                ledger: ledger.clone(),
                ticket_command: repos.ticket_command.clone(),
                payment: payment.clone(),
                payment_policy,
            },
            tracer_for(registry, "booking_service"),
        ));

        let ticket: DynTicketService = Arc::new(TicketService::new(
            TicketServiceDeps {
                ledger,
                event_query: repos.event_query.clone(),
                ticket_query: repos.ticket_query.clone(),
                ticket_command: repos.ticket_command.clone(),
            },
            tracer_for(registry, "ticket_service"),
        ));

        let order: DynOrderService = Arc::new(OrderService::new(
            repos.order_query.clone(),
            tracer_for(registry, "order_service"),
        ));

        let vendor: DynVendorService = Arc::new(VendorService::new(
            repos.vendor_query.clone(),
            repos.vendor_command,
            tracer_for(registry, "vendor_service"),
        ));

        Ok(Self {
            identity,
            event,
            booking,
            ticket,
            order,
            payment,
            vendor,
        })
    }
}
