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
    routing::{get, post, put},
};
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use ticketing::{
    abstract_trait::order::{DynOrderService, DynPaymentService},
    domain::{
        requests::order::PaymentNotificationRequest,
        response::order::{ChargeResponse, OrderResponse},
    },
    policy::Actor,
};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Orders placed by the caller", body = ApiResponse<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_orders(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_user_orders(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Not your order"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_order(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/charge",
    tag = "Payment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 201, description = "Charge requested from the gateway", body = ApiResponse<ChargeResponse>),
        (status = 409, description = "Order is not awaiting payment"),
        (status = 502, description = "Gateway unavailable")
    )
)]
pub async fn create_charge(
    Extension(service): Extension<DynPaymentService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_charge(&actor, id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/sync",
    tag = "Payment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment status pulled from the gateway", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Order has no charge"),
        (status = 502, description = "Gateway unavailable")
    )
)]
pub async fn sync_payment(
    Extension(service): Extension<DynPaymentService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.sync_payment(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/payments/notification",
    tag = "Payment",
    request_body = PaymentNotificationRequest,
    responses(
        (status = 200, description = "Notification applied", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Transaction does not match the order")
    )
)]
pub async fn payment_notification(
    Extension(service): Extension<DynPaymentService>,
    SimpleValidatedJson(body): SimpleValidatedJson<PaymentNotificationRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.reconcile_payment(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let payment = app_state.di_container.payment.clone();

    let public_routes = OpenApiRouter::new()
        .route("/api/payments/notification", post(payment_notification))
        .layer(Extension(payment.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/api/orders", get(get_my_orders))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/charge", post(create_charge))
        .route("/api/orders/{id}/sync", put(sync_payment))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order.clone()))
        .layer(Extension(payment))
        .layer(Extension(app_state.di_container.identity.clone()));

    public_routes.merge(private_routes)
}
