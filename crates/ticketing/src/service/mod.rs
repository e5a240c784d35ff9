pub mod booking;
pub mod event;
pub mod gateway;
pub mod identity;
pub mod ledger;
pub mod order;
pub mod payment;
pub mod ticket;
pub mod vendor;

pub use self::booking::{BookingService, BookingServiceDeps, MAX_BOOKING_QUANTITY};
pub use self::event::{EventService, EventServiceDeps};
pub use self::gateway::SandboxPaymentGateway;
pub use self::identity::{IdentityService, IdentityServiceDeps};
pub use self::ledger::{InventoryLedger, Reservation};
pub use self::order::{OrderAggregator, OrderService, initial_payment_status};
pub use self::payment::{PaymentService, PaymentServiceDeps, map_gateway_status};
pub use self::ticket::{MAX_ISSUE_QUANTITY, TicketService, TicketServiceDeps};
pub use self::vendor::VendorService;
