mod common;

use common::{Harness, booking, organizer};
use shared::{config::PaymentPolicy, errors::ServiceError};
use ticketing::{domain::requests::order::PaymentNotificationRequest, model::PaymentStatus};

fn notification(order_id: i32, transaction_id: &str, status: &str) -> PaymentNotificationRequest {
    PaymentNotificationRequest {
        order_id,
        transaction_id: transaction_id.into(),
        transaction_status: status.into(),
    }
}

#[tokio::test]
async fn gateway_bookings_start_pending_with_a_charge() {
    let h = Harness::with_policy(PaymentPolicy::AwaitGateway);
    let buyer = h.register("buyer@example.com").await;
    let event_id = h.published_event(&organizer(1), 5, 20).await;

    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 2))
        .await
        .unwrap()
        .data;

    assert_eq!(booked.payment_status, PaymentStatus::Pending);
    let charge = booked.charge.expect("charge created after booking");
    assert!(charge.transaction_id.starts_with("SBX-"));
    assert_eq!(charge.order_id, booked.order_id);

    let order = h
        .di
        .order
        .get_order(&buyer, booked.order_id)
        .await
        .unwrap()
        .data;
    assert_eq!(order.transaction_id.as_deref(), Some(charge.transaction_id.as_str()));
}

#[tokio::test]
async fn only_capture_and_settlement_complete_an_order() {
    let h = Harness::with_policy(PaymentPolicy::AwaitGateway);
    let buyer = h.register("buyer@example.com").await;
    let event_id = h.published_event(&organizer(1), 10, 20).await;

    for (status, expected) in [
        ("pending", PaymentStatus::Pending),
        ("deny", PaymentStatus::Pending),
        ("expire", PaymentStatus::Pending),
        ("settlement", PaymentStatus::Completed),
    ] {
        let booked = h
            .di
            .booking
            .book_tickets(&buyer, &booking(event_id, 1))
            .await
            .unwrap()
            .data;
        let tid = booked.charge.unwrap().transaction_id;
        let before = h.available(event_id).await;

        let order = h
            .di
            .payment
            .reconcile_payment(&notification(booked.order_id, &tid, status))
            .await
            .unwrap()
            .data;

        assert_eq!(order.payment_status, expected, "status {status}");
        assert_eq!(h.available(event_id).await, before, "inventory untouched on {status}");
    }
}

#[tokio::test]
async fn mismatched_transaction_is_rejected() {
    let h = Harness::with_policy(PaymentPolicy::AwaitGateway);
    let buyer = h.register("buyer@example.com").await;
    let event_id = h.published_event(&organizer(1), 5, 20).await;
    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap()
        .data;

    let err = h
        .di
        .payment
        .reconcile_payment(&notification(booked.order_id, "SBX-forged", "capture"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    let err = h
        .di
        .payment
        .reconcile_payment(&notification(4242, "SBX-any", "capture"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn sync_pulls_the_gateway_status() {
    let h = Harness::with_policy(PaymentPolicy::AwaitGateway);
    let buyer = h.register("buyer@example.com").await;
    let event_id = h.published_event(&organizer(1), 5, 20).await;
    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap()
        .data;
    let tid = booked.charge.unwrap().transaction_id;

    let still = h
        .di
        .payment
        .sync_payment(&buyer, booked.order_id)
        .await
        .unwrap()
        .data;
    assert_eq!(still.payment_status, PaymentStatus::Pending);

    h.gateway.set_status(&tid, "capture").unwrap();
    let paid = h
        .di
        .payment
        .sync_payment(&buyer, booked.order_id)
        .await
        .unwrap()
        .data;
    assert_eq!(paid.payment_status, PaymentStatus::Completed);

    let err = h
        .di
        .payment
        .create_charge(&buyer, booked.order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn completed_orders_have_nothing_to_sync() {
    let h = Harness::new();
    let buyer = h.register("buyer@example.com").await;
    let event_id = h.published_event(&organizer(1), 5, 20).await;
    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap()
        .data;
    assert_eq!(booked.payment_status, PaymentStatus::Completed);

    let err = h
        .di
        .payment
        .sync_payment(&buyer, booked.order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn notification_cannot_bind_a_charge_to_an_uncharged_order() {
    let h = Harness::with_policy(PaymentPolicy::AwaitGateway);
    let buyer = h.register("buyer@example.com").await;
    // The sandbox refuses zero-amount charges, so the order stays pending with no charge.
    let event_id = h.published_event(&organizer(1), 5, 0).await;
    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap()
        .data;
    assert!(booked.charge.is_none());
    assert_eq!(booked.payment_status, PaymentStatus::Pending);

    let err = h
        .di
        .payment
        .reconcile_payment(&notification(booked.order_id, "FORGED-123", "settlement"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    let order = h
        .di
        .order
        .get_order(&buyer, booked.order_id)
        .await
        .unwrap()
        .data;
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert!(order.transaction_id.is_none());
}

#[tokio::test]
async fn unresolved_notifications_leave_the_order_untouched() {
    let h = Harness::with_policy(PaymentPolicy::AwaitGateway);
    let buyer = h.register("buyer@example.com").await;
    let event_id = h.published_event(&organizer(1), 5, 20).await;
    let booked = h
        .di
        .booking
        .book_tickets(&buyer, &booking(event_id, 1))
        .await
        .unwrap()
        .data;
    let tid = booked.charge.unwrap().transaction_id;

    let order = h
        .di
        .payment
        .reconcile_payment(&notification(booked.order_id, &tid, "deny"))
        .await
        .unwrap()
        .data;
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(order.transaction_id.as_deref(), Some(tid.as_str()));

    let forged = h
        .di
        .payment
        .reconcile_payment(&notification(booked.order_id, "SBX-other", "settlement"))
        .await
        .unwrap_err();
    assert!(matches!(forged, ServiceError::Conflict(_)));

    let order = h
        .di
        .order
        .get_order(&buyer, booked.order_id)
        .await
        .unwrap()
        .data;
    assert_eq!(order.transaction_id.as_deref(), Some(tid.as_str()));
}
