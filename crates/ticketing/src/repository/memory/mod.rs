//! Process-local storage engine.
//!
//! Every collection sits behind one mutex, so each trait method is a single
//! critical section. That gives the conditional counter updates and the
//! multi-row writes the same all-or-nothing behavior the SQL engine gets
//! from `UPDATE … WHERE` and transactions.

mod event;
mod order;
mod ticket;
mod user;
mod vendor;

use crate::model::{Event, Order, Ticket, User, Vendor};
use chrono::{NaiveDateTime, Utc};
use shared::errors::RepositoryError;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

#[derive(Debug, Default)]
pub(crate) struct State {
    pub users: BTreeMap<i32, User>,
    pub vendors: BTreeMap<i32, Vendor>,
    pub events: BTreeMap<i32, Event>,
    pub tickets: BTreeMap<i32, Ticket>,
    pub orders: BTreeMap<i32, Order>,
    last_id: i32,
}

impl State {
    pub fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    /// Same clamp as the SQL release: never above total.
    pub fn release(&mut self, event_id: i32, quantity: i32) -> Option<Event> {
        let event = self.events.get_mut(&event_id)?;
        event.available_tickets = (event.available_tickets + quantity).min(event.total_tickets);
        event.updated_at = Some(now());
        Some(event.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Custom("memory store lock poisoned".into()))
    }
}

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
