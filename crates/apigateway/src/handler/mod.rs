mod auth;
mod event;
mod order;
mod ticket;
mod user;
mod vendor;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::auth::auth_routes;
pub use self::event::event_routes;
pub use self::order::order_routes;
pub use self::ticket::ticket_routes;
pub use self::user::user_routes;
pub use self::vendor::vendor_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_user_handler,
        auth::login_user_handler,
        auth::get_me_handler,

        user::update_roles_handler,

        event::get_events,
        event::get_event,
        event::create_event,
        event::update_event,
        event::publish_event,
        event::delete_event,

        ticket::book_tickets,
        ticket::issue_tickets,
        ticket::get_tickets,
        ticket::get_ticket,
        ticket::get_ticket_by_code,
        ticket::update_ticket,
        ticket::cancel_ticket,
        ticket::check_in_ticket,
        ticket::delete_ticket,
        ticket::get_user_tickets,
        ticket::get_event_tickets,

        order::get_my_orders,
        order::get_order,
        order::create_charge,
        order::sync_payment,
        order::payment_notification,

        vendor::get_vendors,
        vendor::get_vendor,
        vendor::get_user_vendors,
        vendor::create_vendor,
        vendor::update_vendor,
        vendor::delete_vendor,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and the current user"),
        (name = "User", description = "Role administration"),
        (name = "Event", description = "Events and their capacity"),
        (name = "Ticket", description = "Booking, issuance and the ticket lifecycle"),
        (name = "Order", description = "Orders"),
        (name = "Payment", description = "Charges and gateway reconciliation"),
        (name = "Vendor", description = "Vendors"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        Body::from(buffer),
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    /// The full application: API routes, `/metrics` and Swagger UI.
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(auth_routes(shared_state.clone()))
            .merge(user_routes(shared_state.clone()))
            .merge(event_routes(shared_state.clone()))
            .merge(ticket_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(vendor_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}
