mod common;

use common::{Harness, admin, attendee, booking, organizer};
use shared::errors::ServiceError;
use ticketing::{
    domain::requests::ticket::{IssueTicketsRequest, UpdateTicketRequest},
    model::{TicketStatus, TicketType},
};

fn issue(event_id: i32, quantity: i32) -> IssueTicketsRequest {
    IssueTicketsRequest {
        event_id,
        quantity,
        ticket_type: TicketType::Vip,
        price: None,
        seat_number: None,
    }
}

#[tokio::test]
async fn cancelling_twice_releases_once() {
    let h = Harness::new();
    let buyer = attendee(2);
    let event_id = h.published_event(&organizer(1), 4, 10).await;
    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 2))
        .await
        .unwrap()
        .data;
    let id = booked.ticket_ids[0];

    let cancelled = h.di.ticket.cancel_ticket(&buyer, id).await.unwrap().data;
    assert_eq!(cancelled.status, TicketStatus::Cancelled);
    assert_eq!(h.available(event_id).await, 3);

    let err = h.di.ticket.cancel_ticket(&buyer, id).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyInTerminalState(_)));
    assert_eq!(h.available(event_id).await, 3);
}

#[tokio::test]
async fn strangers_cannot_cancel_someone_elses_ticket() {
    let h = Harness::new();
    let event_id = h.published_event(&organizer(1), 4, 10).await;
    let booked = h
        .di
        .booking
        .book_tickets(&attendee(2), &booking(event_id, 1))
        .await
        .unwrap()
        .data;

    let err = h
        .di
        .ticket
        .cancel_ticket(&attendee(3), booked.ticket_ids[0])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));
    assert_eq!(h.available(event_id).await, 3);
}

#[tokio::test]
async fn check_in_follows_the_lifecycle() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.published_event(&org, 10, 10).await;

    let issued = h
        .di
        .ticket
        .issue_tickets(&org, &issue(event_id, 2))
        .await
        .unwrap()
        .data;
    assert!(issued.iter().all(|t| t.status == TicketStatus::Reserved));

    let used = h.di.ticket.check_in(&org, issued[0].id).await.unwrap().data;
    assert_eq!(used.status, TicketStatus::Used);

    let again = h.di.ticket.check_in(&org, issued[0].id).await.unwrap_err();
    assert!(matches!(again, ServiceError::AlreadyInTerminalState(_)));

    h.di.ticket.cancel_ticket(&org, issued[1].id).await.unwrap();
    let err = h.di.ticket.check_in(&org, issued[1].id).await.unwrap_err();
    assert_eq!(err.to_string(), "Cannot check in a cancelled ticket");
}

#[tokio::test]
async fn attendees_cannot_check_in_their_own_ticket() {
    let h = Harness::new();
    let buyer = attendee(2);
    let event_id = h.published_event(&organizer(1), 3, 10).await;
    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap()
        .data;

    let err = h
        .di
        .ticket
        .check_in(&buyer, booked.ticket_ids[0])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));
}

#[tokio::test]
async fn oversized_batch_creates_nothing() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.draft_event(&org, 99, 10).await;

    let err = h
        .di
        .ticket
        .issue_tickets(&org, &issue(event_id, 100))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InsufficientInventory {
            requested: 100,
            available: 99
        }
    ));
    assert_eq!(h.available(event_id).await, 99);

    let listed = h.di.ticket.list_event_tickets(&org, event_id).await.unwrap();
    assert!(listed.data.is_empty());

    for quantity in [0, 101] {
        let err = h
            .di
            .ticket
            .issue_tickets(&org, &issue(event_id, quantity))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::QuantityOutOfRange { max: 100, .. }
        ));
    }
}

#[tokio::test]
async fn batch_issue_works_on_drafts_and_uses_event_price() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.draft_event(&org, 100, 25).await;

    let issued = h
        .di
        .ticket
        .issue_tickets(&org, &issue(event_id, 100))
        .await
        .unwrap()
        .data;
    assert_eq!(issued.len(), 100);
    assert!(issued.iter().all(|t| t.price == 25 && t.user_id == 1));
    assert_eq!(h.available(event_id).await, 0);
}

#[tokio::test]
async fn only_the_organizer_issues_tickets() {
    let h = Harness::new();
    let event_id = h.draft_event(&organizer(1), 10, 10).await;

    for actor in [attendee(2), organizer(3)] {
        let err = h
            .di
            .ticket
            .issue_tickets(&actor, &issue(event_id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AccessDenied(_)));
    }

    h.di
        .ticket
        .issue_tickets(&admin(9), &issue(event_id, 1))
        .await
        .unwrap();
    assert_eq!(h.available(event_id).await, 9);
}

#[tokio::test]
async fn seat_number_requires_a_single_ticket() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.draft_event(&org, 10, 10).await;

    let mut req = issue(event_id, 2);
    req.seat_number = Some("A1".into());
    let err = h.di.ticket.issue_tickets(&org, &req).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    req.quantity = 1;
    let issued = h.di.ticket.issue_tickets(&org, &req).await.unwrap().data;
    assert_eq!(issued[0].seat_number.as_deref(), Some("A1"));
}

#[tokio::test]
async fn deleting_a_live_ticket_releases_capacity() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.published_event(&org, 5, 10).await;
    let booked = h
        .di
        .booking
        .book_tickets(&attendee(2), &booking(event_id, 2))
        .await
        .unwrap()
        .data;
    assert_eq!(h.available(event_id).await, 3);

    h.di
        .ticket
        .delete_ticket(&org, booked.ticket_ids[0])
        .await
        .unwrap();
    assert_eq!(h.available(event_id).await, 4);

    h.di
        .ticket
        .cancel_ticket(&org, booked.ticket_ids[1])
        .await
        .unwrap();
    assert_eq!(h.available(event_id).await, 5);

    h.di
        .ticket
        .delete_ticket(&org, booked.ticket_ids[1])
        .await
        .unwrap();
    assert_eq!(h.available(event_id).await, 5);

    let err = h
        .di
        .ticket
        .get_ticket(&org, booked.ticket_ids[1])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn roster_is_scoped_to_the_viewer() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.published_event(&org, 10, 10).await;
    for buyer in [2, 3] {
        h.di
            .booking
            .book_tickets(&attendee(buyer), &booking(event_id, 2))
            .await
            .unwrap();
    }

    let full = h.di.ticket.list_event_tickets(&org, event_id).await.unwrap();
    assert_eq!(full.data.len(), 4);

    let own = h
        .di
        .ticket
        .list_event_tickets(&attendee(2), event_id)
        .await
        .unwrap();
    assert_eq!(own.data.len(), 2);
    assert!(own.data.iter().all(|t| t.user_id == 2));

    let err = h
        .di
        .ticket
        .list_event_tickets(&attendee(4), event_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));
}

#[tokio::test]
async fn lookups_by_code_and_details_update() {
    let h = Harness::new();
    let org = organizer(1);
    let buyer = attendee(2);
    let event_id = h.published_event(&org, 10, 10).await;
    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap()
        .data;

    let ticket = h
        .di
        .ticket
        .get_ticket(&buyer, booked.ticket_ids[0])
        .await
        .unwrap()
        .data;
    assert!(ticket.code.starts_with("TKT-"));

    let scanned = h
        .di
        .ticket
        .get_ticket_by_code(&org, &ticket.code)
        .await
        .unwrap()
        .data;
    assert_eq!(scanned.id, ticket.id);

    let err = h
        .di
        .ticket
        .get_ticket_by_code(&buyer, &ticket.code)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));

    let updated = h
        .di
        .ticket
        .update_ticket(
            &org,
            ticket.id,
            &UpdateTicketRequest {
                ticket_type: Some(TicketType::Premium),
                seat_number: Some("B7".into()),
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(updated.ticket_type, TicketType::Premium);
    assert_eq!(updated.seat_number.as_deref(), Some("B7"));
    assert_eq!(updated.status, TicketStatus::Confirmed);

    let mine = h.di.ticket.list_user_tickets(&buyer, 2).await.unwrap();
    assert_eq!(mine.data.len(), 1);
    let err = h.di.ticket.list_all_tickets(&buyer).await.unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));
}

#[tokio::test]
async fn organizers_list_only_tickets_of_their_events() {
    let h = Harness::new();
    let buyer = attendee(3);
    let mine = h.published_event(&organizer(1), 5, 10).await;
    let theirs = h.published_event(&organizer(2), 5, 10).await;

    h.di.booking.book_tickets(&buyer, &booking(mine, 2)).await.unwrap();
    h.di.booking.book_tickets(&buyer, &booking(theirs, 1)).await.unwrap();

    let listed = h.di.ticket.list_all_tickets(&organizer(1)).await.unwrap().data;
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|t| t.event_id == mine));

    let everything = h.di.ticket.list_all_tickets(&admin(9)).await.unwrap().data;
    assert_eq!(everything.len(), 3);
}

#[tokio::test]
async fn negative_price_override_is_rejected() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.draft_event(&org, 5, 10).await;

    let err = h
        .di
        .ticket
        .issue_tickets(
            &org,
            &IssueTicketsRequest {
                price: Some(-5),
                ..issue(event_id, 2)
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(h.available(event_id).await, 5);
}
