mod repository;
mod service;

pub use self::repository::{
    DynEventCommandRepository, DynEventQueryRepository, DynInventoryRepository,
    EventCommandRepositoryTrait, EventQueryRepositoryTrait, InventoryRepositoryTrait,
};
pub use self::service::{DynEventService, EventServiceTrait};
