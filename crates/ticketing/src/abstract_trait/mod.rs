pub mod event;
pub mod order;
pub mod payment;
pub mod ticket;
pub mod user;
pub mod vendor;
