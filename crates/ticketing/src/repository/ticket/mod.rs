mod command;
mod query;

pub use self::command::TicketCommandRepository;
pub use self::query::TicketQueryRepository;
