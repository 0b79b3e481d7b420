//! # Access guard middleware
//!
//! Two stages: validate the bearer token, then re-fetch the admin record
//! by id. Re-resolving on every request (rather than trusting the signed
//! payload) means a deleted admin loses access immediately, not at token
//! expiry. Superadmin-only routes add a second guard on the resolved row.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sea_orm::EntityTrait;

use crate::auth::jwt::extract_bearer_token;
use crate::error::{ApiError, Result};
use crate::server::AppState;

/// The admin resolved from the database for the current request.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub is_superadmin: bool,
}

impl From<entity::admins::Model> for CurrentAdmin {
    fn from(admin: entity::admins::Model) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            username: admin.username,
            is_superadmin: admin.is_superadmin,
        }
    }
}

/// Bearer-token guard applied to all protected routes.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("missing authorization header"))?;

    let token = extract_bearer_token(header)
        .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;

    let claims = state.jwt.validate(token)?;

    // The token may outlive the account; reject stale payloads.
    let admin = entity::Admins::find_by_id(claims.sub)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| ApiError::unauthorized("admin no longer exists"))?;

    request.extensions_mut().insert(CurrentAdmin::from(admin));
    Ok(next.run(request).await)
}

/// Second guard stage for superadmin-only routes; must run after [`auth`].
pub async fn require_superadmin(request: Request, next: Next) -> Result<Response> {
    let is_superadmin = request
        .extensions()
        .get::<CurrentAdmin>()
        .is_some_and(|admin| admin.is_superadmin);

    if !is_superadmin {
        return Err(ApiError::forbidden("superadmin access required"));
    }
    Ok(next.run(request).await)
}
