use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::{error::ApiError, AppState};
use crate::auth::AuthError;

/// Rejects the request with 401 unless it carries a valid `Authorization: Bearer` token.
///
/// Accepted claims are stored in the request extensions.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;

    let claims = state.auth.verify(token)?;
    debug!(user = %claims.name, "Bearer token accepted");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
