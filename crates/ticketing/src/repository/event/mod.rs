mod command;
pub(crate) mod ledger;
mod query;

pub use self::command::EventCommandRepository;
pub use self::ledger::InventoryRepository;
pub use self::query::EventQueryRepository;
