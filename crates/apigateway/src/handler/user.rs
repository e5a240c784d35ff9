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
    routing::put,
};
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use ticketing::{
    abstract_trait::user::DynIdentityService,
    domain::{requests::user::UpdateRolesRequest, response::user::UserResponse},
    policy::Actor,
};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    put,
    path = "/api/users/{id}/roles",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateRolesRequest,
    responses(
        (status = 200, description = "Roles replaced", body = ApiResponse<UserResponse>),
        (status = 400, description = "Empty role set"),
        (status = 403, description = "Admins only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_roles_handler(
    Extension(service): Extension<DynIdentityService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateRolesRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_roles(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/users/{id}/roles", put(update_roles_handler))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.identity.clone()))
}
