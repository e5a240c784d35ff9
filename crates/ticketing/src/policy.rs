//! Authorization decisions for every core operation.
//!
//! `is_allowed` is a pure function of the actor, the action and the
//! ownership facts of the resource. Callers resolve ownership first and
//! must call `authorize` before any write.

use crate::model::{Role, RoleSet, has_any_role, has_role};
use shared::errors::ServiceError;

/// The authenticated identity performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub roles: RoleSet,
}

impl Actor {
    pub fn new(user_id: i32, roles: RoleSet) -> Self {
        Self { user_id, roles }
    }

    pub fn is_admin(&self) -> bool {
        has_role(&self.roles, Role::Admin)
    }

    fn is_staff(&self) -> bool {
        has_any_role(&self.roles, &[Role::Organizer, Role::Admin])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateEvent,
    ManageEvent,
    CreateVendor,
    ManageVendor,
    ViewVendor,
    ViewUserVendors,
    CancelTicket,
    ViewTicket,
    CheckInTicket,
    UpdateTicket,
    DeleteTicket,
    ScanTicket,
    ViewUserTickets,
    ViewEventRoster,
    IssueTickets,
    ListAllTickets,
    ViewOrder,
    PayOrder,
    ManageUserRoles,
}

/// Ownership facts about the target of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Global,
    Event { organizer_id: i32 },
    Vendor { owner_id: i32 },
    Ticket { owner_id: i32, organizer_id: i32 },
    UserTickets { user_id: i32 },
    User { user_id: i32 },
    EventRoster { organizer_id: i32, holds_ticket: bool },
    Order { owner_id: i32 },
}

/// How much of an event's roster an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterScope {
    Full,
    OwnOnly,
}

pub fn is_allowed(actor: &Actor, action: Action, resource: Resource) -> bool {
    use Action as A;
    use Resource as R;

    let admin = actor.is_admin();
    let me = actor.user_id;

    match (action, resource) {
        (A::CreateEvent | A::CreateVendor | A::ListAllTickets, R::Global) => actor.is_staff(),
        (A::ManageUserRoles, R::Global) => admin,

        (A::ManageEvent, R::Event { organizer_id }) => admin || organizer_id == me,
        (A::IssueTickets, R::Event { organizer_id }) => {
            actor.is_staff() && (admin || organizer_id == me)
        }

        (A::ManageVendor | A::ViewVendor, R::Vendor { owner_id }) => admin || owner_id == me,
        (A::ViewUserVendors, R::User { user_id }) => admin || user_id == me,

        (
            A::CancelTicket | A::ViewTicket,
            R::Ticket {
                owner_id,
                organizer_id,
            },
        ) => admin || owner_id == me || organizer_id == me,
        (
            A::CheckInTicket | A::UpdateTicket | A::DeleteTicket | A::ScanTicket,
            R::Ticket { organizer_id, .. },
        ) => admin || organizer_id == me,

        (A::ViewUserTickets, R::UserTickets { user_id }) => admin || user_id == me,
        (A::ViewEventRoster, R::EventRoster { .. }) => roster_scope(actor, resource).is_some(),

        (A::ViewOrder | A::PayOrder, R::Order { owner_id }) => admin || owner_id == me,

        _ => false,
    }
}

/// Roster visibility: organizer and admin see everything, ticket holders see their own.
pub fn roster_scope(actor: &Actor, resource: Resource) -> Option<RosterScope> {
    match resource {
        Resource::EventRoster {
            organizer_id,
            holds_ticket,
        } => {
            if actor.is_admin() || organizer_id == actor.user_id {
                Some(RosterScope::Full)
            } else if holds_ticket {
                Some(RosterScope::OwnOnly)
            } else {
                None
            }
        }
        _ => None,
    }
}

pub fn authorize(actor: &Actor, action: Action, resource: Resource) -> Result<(), ServiceError> {
    if is_allowed(actor, action, resource) {
        Ok(())
    } else {
        Err(ServiceError::access_denied(denial_message(action)))
    }
}

fn denial_message(action: Action) -> &'static str {
    match action {
        Action::CreateEvent => "only organizers and admins can create events",
        Action::ManageEvent => "only the event organizer or an admin can modify this event",
        Action::CreateVendor => "only organizers and admins can create vendors",
        Action::ManageVendor | Action::ViewVendor => "vendor belongs to another user",
        Action::ViewUserVendors => "cannot view another user's vendors",
        Action::CancelTicket => "not authorized to cancel this ticket",
        Action::ViewTicket => "not authorized to view this ticket",
        Action::CheckInTicket => "only the event organizer or an admin can check in tickets",
        Action::UpdateTicket => "only the event organizer or an admin can update tickets",
        Action::DeleteTicket => "only the event organizer or an admin can delete tickets",
        Action::ScanTicket => "only the event organizer or an admin can look up ticket codes",
        Action::ViewUserTickets => "cannot view another user's tickets",
        Action::ViewEventRoster => "not authorized to view tickets for this event",
        Action::IssueTickets => "only the event organizer or an admin can issue tickets",
        Action::ListAllTickets => "only organizers and admins can list all tickets",
        Action::ViewOrder | Action::PayOrder => "order belongs to another user",
        Action::ManageUserRoles => "only admins can change user roles",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn actor(id: i32, roles: &[Role]) -> Actor {
        Actor::new(id, RoleSet::new(roles.iter().copied()))
    }

    const ACTIONS: &[Action] = &[
        Action::CreateEvent,
        Action::ManageEvent,
        Action::CreateVendor,
        Action::ManageVendor,
        Action::ViewVendor,
        Action::ViewUserVendors,
        Action::CancelTicket,
        Action::ViewTicket,
        Action::CheckInTicket,
        Action::UpdateTicket,
        Action::DeleteTicket,
        Action::ScanTicket,
        Action::ViewUserTickets,
        Action::ViewEventRoster,
        Action::IssueTickets,
        Action::ListAllTickets,
        Action::ViewOrder,
        Action::PayOrder,
        Action::ManageUserRoles,
    ];

    fn resource_for(action: Action, owner: i32, organizer: i32) -> Resource {
        match action {
            Action::CreateEvent
            | Action::CreateVendor
            | Action::ListAllTickets
            | Action::ManageUserRoles => Resource::Global,
            Action::ManageEvent | Action::IssueTickets => Resource::Event {
                organizer_id: organizer,
            },
            Action::ManageVendor | Action::ViewVendor => Resource::Vendor { owner_id: owner },
            Action::ViewUserVendors => Resource::User { user_id: owner },
            Action::CancelTicket
            | Action::ViewTicket
            | Action::CheckInTicket
            | Action::UpdateTicket
            | Action::DeleteTicket
            | Action::ScanTicket => Resource::Ticket {
                owner_id: owner,
                organizer_id: organizer,
            },
            Action::ViewUserTickets => Resource::UserTickets { user_id: owner },
            Action::ViewEventRoster => Resource::EventRoster {
                organizer_id: organizer,
                holds_ticket: false,
            },
            Action::ViewOrder | Action::PayOrder => Resource::Order { owner_id: owner },
        }
    }

    #[test]
    fn attendee_cannot_create_events() {
        let a = actor(1, &[Role::Attendee]);
        assert!(!is_allowed(&a, Action::CreateEvent, Resource::Global));
        assert!(is_allowed(
            &actor(1, &[Role::Organizer]),
            Action::CreateEvent,
            Resource::Global
        ));
    }

    #[test]
    fn ticket_owner_can_cancel_but_not_check_in() {
        let owner = actor(7, &[Role::Attendee]);
        let ticket = Resource::Ticket {
            owner_id: 7,
            organizer_id: 2,
        };
        assert!(is_allowed(&owner, Action::CancelTicket, ticket));
        assert!(!is_allowed(&owner, Action::CheckInTicket, ticket));
    }

    #[test]
    fn event_organizer_can_check_in_any_ticket_of_the_event() {
        let organizer = actor(2, &[Role::Organizer]);
        let ticket = Resource::Ticket {
            owner_id: 7,
            organizer_id: 2,
        };
        assert!(is_allowed(&organizer, Action::CheckInTicket, ticket));
        assert!(is_allowed(&organizer, Action::CancelTicket, ticket));
    }

    #[test]
    fn organizer_of_another_event_cannot_issue() {
        let other = actor(3, &[Role::Organizer]);
        assert!(!is_allowed(
            &other,
            Action::IssueTickets,
            Resource::Event { organizer_id: 2 }
        ));
    }

    #[test]
    fn issuing_requires_a_staff_role_even_for_the_owner() {
        let demoted = actor(2, &[Role::Attendee]);
        assert!(!is_allowed(
            &demoted,
            Action::IssueTickets,
            Resource::Event { organizer_id: 2 }
        ));
    }

    #[test]
    fn roster_scopes() {
        let roster = |holds_ticket| Resource::EventRoster {
            organizer_id: 2,
            holds_ticket,
        };
        assert_eq!(
            roster_scope(&actor(2, &[Role::Organizer]), roster(false)),
            Some(RosterScope::Full)
        );
        assert_eq!(
            roster_scope(&actor(9, &[Role::Admin]), roster(false)),
            Some(RosterScope::Full)
        );
        assert_eq!(
            roster_scope(&actor(7, &[Role::Attendee]), roster(true)),
            Some(RosterScope::OwnOnly)
        );
        assert_eq!(
            roster_scope(&actor(7, &[Role::Attendee]), roster(false)),
            None
        );
    }

    #[test]
    fn mismatched_resource_is_denied() {
        let admin = actor(1, &[Role::Admin]);
        assert!(!is_allowed(
            &admin,
            Action::CheckInTicket,
            Resource::Order { owner_id: 1 }
        ));
    }

    #[test]
    fn authorize_reports_access_denied() {
        let err = authorize(
            &actor(1, &[Role::Attendee]),
            Action::ManageUserRoles,
            Resource::Global,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));
    }

    proptest! {
        #[test]
        fn admin_is_always_allowed(
            idx in 0..ACTIONS.len(),
            me in 1..1000i32,
            owner in 1..1000i32,
            organizer in 1..1000i32,
        ) {
            let action = ACTIONS[idx];
            let admin = actor(me, &[Role::Admin]);
            prop_assert!(is_allowed(&admin, action, resource_for(action, owner, organizer)));
        }

        #[test]
        fn roleless_stranger_gets_nothing(
            idx in 0..ACTIONS.len(),
            owner in 1..1000i32,
            organizer in 1..1000i32,
        ) {
            let action = ACTIONS[idx];
            let stranger = actor(0, &[]);
            prop_assert!(!is_allowed(&stranger, action, resource_for(action, owner, organizer)));
        }
    }
}
