mod repository;
mod service;

pub use self::repository::{
    CreatedTickets, DynTicketCommandRepository, DynTicketQueryRepository,
    TicketCommandRepositoryTrait, TicketQueryRepositoryTrait,
};
pub use self::service::{
    BookingServiceTrait, DynBookingService, DynTicketService, TicketServiceTrait,
};
