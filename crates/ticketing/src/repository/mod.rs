pub mod event;
pub mod memory;
pub mod order;
pub mod ticket;
pub mod user;
pub mod vendor;

use crate::abstract_trait::{
    event::{DynEventCommandRepository, DynEventQueryRepository, DynInventoryRepository},
    order::{DynOrderCommandRepository, DynOrderQueryRepository},
    ticket::{DynTicketCommandRepository, DynTicketQueryRepository},
    user::{DynUserCommandRepository, DynUserQueryRepository},
    vendor::{DynVendorCommandRepository, DynVendorQueryRepository},
};
use shared::config::ConnectionPool;
use std::sync::Arc;

use self::{
    event::{EventCommandRepository, EventQueryRepository, InventoryRepository},
    memory::MemoryStore,
    order::{OrderCommandRepository, OrderQueryRepository},
    ticket::{TicketCommandRepository, TicketQueryRepository},
    user::{UserCommandRepository, UserQueryRepository},
    vendor::{VendorCommandRepository, VendorQueryRepository},
};

/// Every repository the services need, backed by one storage engine.
#[derive(Clone)]
pub struct Repositories {
    pub event_query: DynEventQueryRepository,
    pub event_command: DynEventCommandRepository,
    pub inventory: DynInventoryRepository,
    pub ticket_query: DynTicketQueryRepository,
    pub ticket_command: DynTicketCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub vendor_query: DynVendorQueryRepository,
    pub vendor_command: DynVendorCommandRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            event_query: Arc::new(EventQueryRepository::new(pool.clone())),
            event_command: Arc::new(EventCommandRepository::new(pool.clone())),
            inventory: Arc::new(InventoryRepository::new(pool.clone())),
            ticket_query: Arc::new(TicketQueryRepository::new(pool.clone())),
            ticket_command: Arc::new(TicketCommandRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool.clone())),
            user_query: Arc::new(UserQueryRepository::new(pool.clone())),
            user_command: Arc::new(UserCommandRepository::new(pool.clone())),
            vendor_query: Arc::new(VendorQueryRepository::new(pool.clone())),
            vendor_command: Arc::new(VendorCommandRepository::new(pool)),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        Self {
            event_query: Arc::new(store.clone()),
            event_command: Arc::new(store.clone()),
            inventory: Arc::new(store.clone()),
            ticket_query: Arc::new(store.clone()),
            ticket_command: Arc::new(store.clone()),
            order_query: Arc::new(store.clone()),
            order_command: Arc::new(store.clone()),
            user_query: Arc::new(store.clone()),
            user_command: Arc::new(store.clone()),
            vendor_query: Arc::new(store.clone()),
            vendor_command: Arc::new(store),
        }
    }
}
