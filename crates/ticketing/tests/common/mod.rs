#![allow(dead_code)]

use chrono::NaiveDate;
use prometheus_client::registry::Registry;
use shared::config::{Hashing, JwtConfig, PaymentPolicy};
use std::sync::Arc;
use ticketing::{
    di::{DependenciesInject, DependenciesInjectDeps},
    domain::requests::{
        event::CreateEventRequest,
        ticket::BookTicketRequest,
        user::RegisterRequest,
    },
    model::{EventCategory, EventType, PaymentMethod, Role, RoleSet, TicketType},
    policy::Actor,
    repository::{Repositories, memory::MemoryStore},
    service::SandboxPaymentGateway,
};

pub struct Harness {
    pub di: DependenciesInject,
    pub repos: Repositories,
    pub gateway: Arc<SandboxPaymentGateway>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policy(PaymentPolicy::AssumeCompleted)
    }

    pub fn with_policy(payment_policy: PaymentPolicy) -> Self {
        Self::with_repositories(Repositories::memory(MemoryStore::new()), payment_policy)
    }

    /// Wires the services over `repos`, which tests may have partly swapped out.
    pub fn with_repositories(repos: Repositories, payment_policy: PaymentPolicy) -> Self {
        let gateway = Arc::new(SandboxPaymentGateway::new());
        let mut registry = Registry::default();

        let di = DependenciesInject::new(
            DependenciesInjectDeps {
                repos: repos.clone(),
                hashing: Arc::new(Hashing::with_cost(4)),
                jwt: Arc::new(JwtConfig::new("test-secret")),
                gateway: gateway.clone(),
                payment_policy,
            },
            &mut registry,
        )
        .expect("container builds");

        Self { di, repos, gateway }
    }

    /// Registers an account and returns it as an attendee actor.
    pub async fn register(&self, email: &str) -> Actor {
        let user = self
            .di
            .identity
            .register(&RegisterRequest {
                first_name: "Test".into(),
                last_name: "User".into(),
                email: email.into(),
                password: "password123".into(),
                confirm_password: "password123".into(),
                phone: None,
                request_organizer_access: false,
            })
            .await
            .expect("registration succeeds")
            .data;

        Actor::new(user.id, RoleSet::attendee())
    }

    /// Creates and publishes an event owned by `organizer`.
    pub async fn published_event(&self, organizer: &Actor, total: i32, price: i64) -> i32 {
        let id = self.draft_event(organizer, total, price).await;
        self.di
            .event
            .publish_event(organizer, id)
            .await
            .expect("publish succeeds");
        id
    }

    pub async fn draft_event(&self, organizer: &Actor, total: i32, price: i64) -> i32 {
        self.di
            .event
            .create_event(organizer, &event_request(total, price))
            .await
            .expect("event is created")
            .data
            .id
    }

    pub async fn available(&self, event_id: i32) -> i32 {
        self.di
            .event
            .get_event(event_id)
            .await
            .expect("event exists")
            .data
            .available_tickets
    }
}

pub fn organizer(user_id: i32) -> Actor {
    Actor::new(user_id, RoleSet::new([Role::Organizer]))
}

pub fn admin(user_id: i32) -> Actor {
    Actor::new(user_id, RoleSet::new([Role::Admin]))
}

pub fn attendee(user_id: i32) -> Actor {
    Actor::new(user_id, RoleSet::attendee())
}

pub fn event_request(total: i32, price: i64) -> CreateEventRequest {
    CreateEventRequest {
        title: "Rust Meetup".into(),
        description: "Monthly meetup".into(),
        starts_at: NaiveDate::from_ymd_opt(2030, 5, 17)
            .and_then(|d| d.and_hms_opt(19, 0, 0))
            .expect("valid date"),
        location: "Jakarta".into(),
        category: EventCategory::Networking,
        event_type: EventType::InPerson,
        total_tickets: total,
        price,
        vendor_id: None,
        image_url: None,
    }
}

pub fn booking(event_id: i32, quantity: i32) -> BookTicketRequest {
    BookTicketRequest {
        event_id,
        quantity,
        ticket_type: TicketType::General,
        payment_method: PaymentMethod::CreditCard,
    }
}
