use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use sqlx::FromRow;
use thiserror::Error;

string_enum! {
    TicketType {
        General => "general",
        Vip => "vip",
        Premium => "premium",
        Student => "student",
        EarlyBird => "early_bird",
    }
}

string_enum! {
    TicketStatus {
        Reserved => "reserved",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
        Used => "used",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Ticket already checked in")]
    AlreadyCheckedIn,
    #[error("Cannot check in a cancelled ticket")]
    CheckInCancelled,
    #[error("Ticket already cancelled")]
    AlreadyCancelled,
}

impl From<TransitionError> for ServiceError {
    fn from(err: TransitionError) -> Self {
        ServiceError::AlreadyInTerminalState(err.to_string())
    }
}

impl TicketStatus {
    /// Whether the ticket still holds a unit of event capacity.
    pub fn holds_capacity(&self) -> bool {
        !matches!(self, TicketStatus::Cancelled)
    }

    pub fn check_in(self) -> Result<TicketStatus, TransitionError> {
        match self {
            TicketStatus::Reserved | TicketStatus::Confirmed => Ok(TicketStatus::Used),
            TicketStatus::Used => Err(TransitionError::AlreadyCheckedIn),
            TicketStatus::Cancelled => Err(TransitionError::CheckInCancelled),
        }
    }

    pub fn cancel(self) -> Result<TicketStatus, TransitionError> {
        match self {
            TicketStatus::Cancelled => Err(TransitionError::AlreadyCancelled),
            _ => Ok(TicketStatus::Cancelled),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub ticket_id: i32,
    pub event_id: i32,
    pub user_id: i32,
    #[sqlx(try_from = "String")]
    pub ticket_type: TicketType,
    pub price: i64,
    #[sqlx(try_from = "String")]
    pub status: TicketStatus,
    pub booking_date: NaiveDateTime,
    pub seat_number: Option<String>,
    pub code: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A ticket about to be written; ids and timestamps come from storage.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub event_id: i32,
    pub user_id: i32,
    pub ticket_type: TicketType,
    pub price: i64,
    pub status: TicketStatus,
    pub seat_number: Option<String>,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_in_from_live_states() {
        assert_eq!(TicketStatus::Reserved.check_in(), Ok(TicketStatus::Used));
        assert_eq!(TicketStatus::Confirmed.check_in(), Ok(TicketStatus::Used));
    }

    #[test]
    fn check_in_rejected_from_terminal_states() {
        assert_eq!(
            TicketStatus::Used.check_in(),
            Err(TransitionError::AlreadyCheckedIn)
        );
        assert_eq!(
            TicketStatus::Cancelled.check_in(),
            Err(TransitionError::CheckInCancelled)
        );
    }

    #[test]
    fn cancel_allowed_until_cancelled() {
        for status in [
            TicketStatus::Reserved,
            TicketStatus::Confirmed,
            TicketStatus::Used,
        ] {
            assert_eq!(status.cancel(), Ok(TicketStatus::Cancelled));
        }
        assert_eq!(
            TicketStatus::Cancelled.cancel(),
            Err(TransitionError::AlreadyCancelled)
        );
    }

    #[test]
    fn only_cancelled_tickets_stop_holding_capacity() {
        assert!(TicketStatus::Used.holds_capacity());
        assert!(TicketStatus::Reserved.holds_capacity());
        assert!(!TicketStatus::Cancelled.holds_capacity());
    }

    #[test]
    fn status_text_round_trips() {
        for status in TicketStatus::ALL {
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), *status);
        }
        assert!("expired".parse::<TicketStatus>().is_err());
    }
}
