mod common;

use common::{Harness, admin, attendee, booking, event_request, organizer};
use shared::errors::ServiceError;
use ticketing::{
    domain::requests::{
        event::{FindAllEvents, UpdateEventRequest},
        vendor::VendorRequest,
    },
    model::EventCategory,
};

fn resize(total: i32) -> UpdateEventRequest {
    UpdateEventRequest {
        total_tickets: Some(total),
        ..Default::default()
    }
}

#[tokio::test]
async fn attendees_cannot_create_events() {
    let h = Harness::new();
    let err = h
        .di
        .event
        .create_event(&attendee(2), &event_request(10, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));
}

#[tokio::test]
async fn new_events_start_full_and_unpublished() {
    let h = Harness::new();
    let event = h
        .di
        .event
        .create_event(&organizer(1), &event_request(40, 10))
        .await
        .unwrap()
        .data;

    assert_eq!(event.available_tickets, 40);
    assert_eq!(event.total_tickets, 40);
    assert!(!event.is_published);
    assert_eq!(event.organizer_id, 1);
}

#[tokio::test]
async fn resize_keeps_issued_tickets_accounted() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.published_event(&org, 10, 10).await;
    h.di
        .booking
        .book_tickets(&attendee(2), &booking(event_id, 4))
        .await
        .unwrap();

    let grown = h
        .di
        .event
        .update_event(&org, event_id, &resize(20))
        .await
        .unwrap()
        .data;
    assert_eq!(grown.total_tickets, 20);
    assert_eq!(grown.available_tickets, 16);

    let shrunk = h
        .di
        .event
        .update_event(&org, event_id, &resize(10))
        .await
        .unwrap()
        .data;
    assert_eq!(shrunk.available_tickets, 6);

    let err = h
        .di
        .event
        .update_event(&org, event_id, &resize(3))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidCapacity {
            requested: 3,
            issued: 4
        }
    ));
    assert_eq!(h.available(event_id).await, 6);

    let exact = h
        .di
        .event
        .update_event(&org, event_id, &resize(4))
        .await
        .unwrap()
        .data;
    assert_eq!(exact.available_tickets, 0);
}

#[tokio::test]
async fn only_the_organizer_or_admin_updates() {
    let h = Harness::new();
    let event_id = h.draft_event(&organizer(1), 10, 10).await;
    let rename = UpdateEventRequest {
        title: Some("Renamed".into()),
        ..Default::default()
    };

    let err = h
        .di
        .event
        .update_event(&organizer(5), event_id, &rename)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));

    let updated = h
        .di
        .event
        .update_event(&admin(9), event_id, &rename)
        .await
        .unwrap()
        .data;
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn events_with_tickets_cannot_be_deleted() {
    let h = Harness::new();
    let org = organizer(1);
    let event_id = h.published_event(&org, 10, 10).await;
    let booked = h
        .di
        .booking
        .book_tickets(&attendee(2), &booking(event_id, 1))
        .await
        .unwrap()
        .data;

    let err = h.di.event.delete_event(&org, event_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    h.di
        .ticket
        .delete_ticket(&org, booked.ticket_ids[0])
        .await
        .unwrap();
    h.di.event.delete_event(&org, event_id).await.unwrap();

    let err = h.di.event.get_event(event_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn listing_shows_published_events_only() {
    let h = Harness::new();
    let org = organizer(1);
    h.published_event(&org, 10, 10).await;
    h.published_event(&org, 10, 10).await;
    h.draft_event(&org, 10, 10).await;

    let page = h
        .di
        .event
        .list_events(&FindAllEvents {
            page: 1,
            page_size: 10,
            category: None,
            location: None,
            from_date: None,
        })
        .await
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.total_items, 2);
    assert!(page.data.iter().all(|e| e.is_published));

    let filtered = h
        .di
        .event
        .list_events(&FindAllEvents {
            page: 1,
            page_size: 10,
            category: Some(EventCategory::Music),
            location: None,
            from_date: None,
        })
        .await
        .unwrap();
    assert!(filtered.data.is_empty());
}

#[tokio::test]
async fn event_vendor_must_exist() {
    let h = Harness::new();
    let mut req = event_request(10, 10);
    req.vendor_id = Some(404);

    let err = h
        .di
        .event
        .create_event(&organizer(1), &req)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn vendor_names_are_unique_per_owner() {
    let h = Harness::new();
    let org = organizer(1);
    let req = VendorRequest {
        name: "Stagecraft".into(),
        is_active: true,
        ..Default::default()
    };

    let vendor = h.di.vendor.create_vendor(&org, &req).await.unwrap().data;
    assert_eq!(vendor.user_id, 1);

    let err = h.di.vendor.create_vendor(&org, &req).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // Another organizer may reuse the name.
    h.di
        .vendor
        .create_vendor(&organizer(2), &req)
        .await
        .unwrap();

    let err = h
        .di
        .vendor
        .get_vendor(&organizer(2), vendor.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied(_)));

    let mine = h.di.vendor.list_vendors(&org).await.unwrap().data;
    assert_eq!(mine.len(), 1);
    let all = h.di.vendor.list_vendors(&admin(9)).await.unwrap().data;
    assert_eq!(all.len(), 2);

    let mut event = event_request(10, 10);
    event.vendor_id = Some(vendor.id);
    let created = h.di.event.create_event(&org, &event).await.unwrap().data;
    assert_eq!(created.vendor_id, Some(vendor.id));
}

#[tokio::test]
async fn resized_capacity_books_to_exhaustion() {
    let h = Harness::new();
    let org = organizer(1);
    let buyer = attendee(2);
    let event_id = h.published_event(&org, 10, 5).await;

    h.di.booking.book_tickets(&buyer, &booking(event_id, 3)).await.unwrap();

    // Shrink: 5 total, 3 issued, exactly 2 left to sell.
    let event = h.di.event.update_event(&org, event_id, &resize(5)).await.unwrap().data;
    assert_eq!(event.available_tickets, 2);
    h.di.booking.book_tickets(&buyer, &booking(event_id, 2)).await.unwrap();

    let err = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InsufficientInventory {
            requested: 1,
            available: 0
        }
    ));

    // Grow: 8 total, 5 issued, exactly 3 left to sell.
    let event = h.di.event.update_event(&org, event_id, &resize(8)).await.unwrap().data;
    assert_eq!(event.available_tickets, 3);
    h.di.booking.book_tickets(&buyer, &booking(event_id, 3)).await.unwrap();

    let err = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientInventory { .. }));
    assert_eq!(h.available(event_id).await, 0);
}
