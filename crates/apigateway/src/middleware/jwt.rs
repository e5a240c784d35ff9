use axum::{
    Extension,
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::errors::HttpError;
use ticketing::abstract_trait::user::DynIdentityService;
use tracing::warn;

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
}

/// Resolves the caller into an `Actor` request extension.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(identity): Extension<DynIdentityService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(&req))
        .ok_or_else(|| HttpError::unauthorized("You are not logged in, please provide token"))?;

    let actor = identity.resolve_actor(&token).await.map_err(|e| {
        warn!("⚠️ Rejected credentials: {e}");
        HttpError::unauthorized("Invalid token")
    })?;

    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}
