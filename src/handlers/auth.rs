//! Login endpoint.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::server::AppState;
use crate::services::admins::AdminService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// `POST /admin/login`. Unknown usernames and wrong passwords produce the
/// same 401 so the response does not leak which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let service = AdminService::new(state.db.clone(), state.audit.clone());
    let admin = service
        .verify(&request.username, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let access_token = state.jwt.issue(&admin)?;
    Ok(Json(LoginResponse { access_token }))
}
