pub mod event;
pub mod order;
pub mod ticket;
pub mod user;
pub mod vendor;
