use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, instrument};

use super::{error::ApiError, AppState};
use crate::domain::{Credentials, PublicUser};

/// POST /api/users/authenticate
#[instrument(skip_all)]
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<PublicUser>, ApiError> {
    let Json(credentials) = payload?;
    match state.auth.authenticate(&credentials.username, &credentials.password)? {
        Some(user) => {
            info!(user_id = user.id, "Login succeeded");
            Ok(Json(user))
        }
        None => {
            info!("Login failed");
            Err(ApiError::BadRequest("Username or password is incorrect".into()))
        }
    }
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> Json<Vec<PublicUser>> {
    Json(state.auth.users())
}
