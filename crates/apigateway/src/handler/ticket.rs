use crate::{
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use ticketing::{
    abstract_trait::ticket::{DynBookingService, DynTicketService},
    domain::{
        requests::ticket::{BookTicketRequest, IssueTicketsRequest, UpdateTicketRequest},
        response::ticket::{BookingResponse, TicketResponse},
    },
    policy::Actor,
};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/tickets/book",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    request_body = BookTicketRequest,
    responses(
        (status = 201, description = "Tickets booked", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Sold out, unpublished or quantity out of range"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn book_tickets(
    Extension(service): Extension<DynBookingService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<BookTicketRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.book_tickets(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/tickets/issue",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    request_body = IssueTicketsRequest,
    responses(
        (status = 201, description = "Tickets issued", body = ApiResponse<Vec<TicketResponse>>),
        (status = 400, description = "Not enough capacity or quantity out of range"),
        (status = 403, description = "Not the organizer")
    )
)]
pub async fn issue_tickets(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<IssueTicketsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.issue_tickets(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tickets for admins, own events' tickets for organizers", body = ApiResponse<Vec<TicketResponse>>),
        (status = 403, description = "Organizers and admins only")
    )
)]
pub async fn get_tickets(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_all_tickets(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket details", body = ApiResponse<TicketResponse>),
        (status = 403, description = "Not the holder or organizer"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn get_ticket(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_ticket(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/tickets/code/{code}",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    params(("code" = String, Path, description = "Scannable ticket code")),
    responses(
        (status = 200, description = "Ticket for the scanned code", body = ApiResponse<TicketResponse>),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Unknown code")
    )
)]
pub async fn get_ticket_by_code(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_ticket_by_code(&actor, &code).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Ticket updated", body = ApiResponse<TicketResponse>),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn update_ticket(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateTicketRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_ticket(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/tickets/{id}/cancel",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket cancelled", body = ApiResponse<TicketResponse>),
        (status = 400, description = "Already cancelled"),
        (status = 403, description = "Not the holder or organizer")
    )
)]
pub async fn cancel_ticket(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.cancel_ticket(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/tickets/{id}/check-in",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket checked in", body = ApiResponse<TicketResponse>),
        (status = 400, description = "Already used or cancelled"),
        (status = 403, description = "Not the organizer")
    )
)]
pub async fn check_in_ticket(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.check_in(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket deleted"),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn delete_ticket(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_ticket(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/tickets",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Tickets held by the user", body = ApiResponse<Vec<TicketResponse>>),
        (status = 403, description = "Not your tickets")
    )
)]
pub async fn get_user_tickets(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_user_tickets(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/tickets",
    tag = "Ticket",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event roster as visible to the caller", body = ApiResponse<Vec<TicketResponse>>),
        (status = 403, description = "No ticket for this event")
    )
)]
pub async fn get_event_tickets(
    Extension(service): Extension<DynTicketService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_event_tickets(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn ticket_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/tickets", get(get_tickets))
        .route("/api/tickets/book", post(book_tickets))
        .route("/api/tickets/issue", post(issue_tickets))
        .route("/api/tickets/code/{code}", get(get_ticket_by_code))
        .route("/api/tickets/{id}", get(get_ticket))
        .route("/api/tickets/{id}", put(update_ticket))
        .route("/api/tickets/{id}", delete(delete_ticket))
        .route("/api/tickets/{id}/cancel", put(cancel_ticket))
        .route("/api/tickets/{id}/check-in", put(check_in_ticket))
        .route("/api/users/{id}/tickets", get(get_user_tickets))
        .route("/api/events/{id}/tickets", get(get_event_tickets))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.ticket.clone()))
        .layer(Extension(app_state.di_container.booking.clone()))
        .layer(Extension(app_state.di_container.identity.clone()))
}
