use crate::{
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::HttpError,
};
use std::sync::Arc;
use ticketing::{
    abstract_trait::event::DynEventService,
    domain::{
        requests::event::{CreateEventRequest, FindAllEvents, UpdateEventRequest},
        response::event::EventResponse,
    },
    policy::Actor,
};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Event",
    params(FindAllEvents),
    responses(
        (status = 200, description = "Published events", body = ApiResponsePagination<Vec<EventResponse>>),
        (status = 502, description = "Storage unavailable")
    )
)]
pub async fn get_events(
    Extension(service): Extension<DynEventService>,
    Query(params): Query<FindAllEvents>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_events(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Event",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = ApiResponse<EventResponse>),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    Extension(service): Extension<DynEventService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_event(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Event",
    security(("bearer_auth" = [])),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventResponse>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Organizers and admins only")
    )
)]
pub async fn create_event(
    Extension(service): Extension<DynEventService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateEventRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_event(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "Event",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = ApiResponse<EventResponse>),
        (status = 400, description = "Capacity below issued tickets"),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    Extension(service): Extension<DynEventService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateEventRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_event(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/publish",
    tag = "Event",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event published", body = ApiResponse<EventResponse>),
        (status = 403, description = "Not the organizer"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn publish_event(
    Extension(service): Extension<DynEventService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.publish_event(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "Event",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 403, description = "Not the organizer"),
        (status = 409, description = "Tickets still reference the event")
    )
)]
pub async fn delete_event(
    Extension(service): Extension<DynEventService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_event(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn event_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let service = app_state.di_container.event.clone();

    let public_routes = OpenApiRouter::new()
        .route("/api/events", get(get_events))
        .route("/api/events/{id}", get(get_event))
        .layer(Extension(service.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/api/events", post(create_event))
        .route("/api/events/{id}", put(update_event))
        .route("/api/events/{id}", delete(delete_event))
        .route("/api/events/{id}/publish", put(publish_event))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(service))
        .layer(Extension(app_state.di_container.identity.clone()));

    public_routes.merge(private_routes)
}
