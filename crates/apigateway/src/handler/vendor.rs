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
    abstract_trait::vendor::DynVendorService,
    domain::{requests::vendor::VendorRequest, response::vendor::VendorResponse},
    policy::Actor,
};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/vendors",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vendors visible to the caller", body = ApiResponse<Vec<VendorResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_vendors(
    Extension(service): Extension<DynVendorService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_vendors(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/vendors/{id}",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor details", body = ApiResponse<VendorResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn get_vendor(
    Extension(service): Extension<DynVendorService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_vendor(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/vendors",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Vendors owned by the user", body = ApiResponse<Vec<VendorResponse>>),
        (status = 403, description = "Not your vendors")
    )
)]
pub async fn get_user_vendors(
    Extension(service): Extension<DynVendorService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_user_vendors(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/vendors",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    request_body = VendorRequest,
    responses(
        (status = 201, description = "Vendor created", body = ApiResponse<VendorResponse>),
        (status = 403, description = "Organizers and admins only"),
        (status = 409, description = "Name already used by this owner")
    )
)]
pub async fn create_vendor(
    Extension(service): Extension<DynVendorService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<VendorRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_vendor(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/vendors/{id}",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vendor ID")),
    request_body = VendorRequest,
    responses(
        (status = 200, description = "Vendor updated", body = ApiResponse<VendorResponse>),
        (status = 403, description = "Not the owner"),
        (status = 409, description = "Name already used by this owner")
    )
)]
pub async fn update_vendor(
    Extension(service): Extension<DynVendorService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<VendorRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_vendor(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/vendors/{id}",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn delete_vendor(
    Extension(service): Extension<DynVendorService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_vendor(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn vendor_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/vendors", get(get_vendors))
        .route("/api/vendors", post(create_vendor))
        .route("/api/vendors/{id}", get(get_vendor))
        .route("/api/vendors/{id}", put(update_vendor))
        .route("/api/vendors/{id}", delete(delete_vendor))
        .route("/api/users/{id}/vendors", get(get_user_vendors))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.vendor.clone()))
        .layer(Extension(app_state.di_container.identity.clone()))
}
