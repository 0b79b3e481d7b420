//! Admin management and audit log endpoints.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::audit::AuditEntryResponse;
use crate::auth::middleware::CurrentAdmin;
use crate::error::Result;
use crate::server::AppState;
use crate::services::admins::{
    AdminResponse, AdminService, ChangePasswordRequest, CreateAdminRequest, UpdateAdminRequest,
};

fn service(state: &AppState) -> AdminService {
    AdminService::new(state.db.clone(), state.audit.clone())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<Json<AdminResponse>> {
    Ok(Json(service(&state).create(&admin, request).await?))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AdminResponse>>> {
    Ok(Json(service(&state).list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AdminResponse>> {
    Ok(Json(service(&state).get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAdminRequest>,
) -> Result<Json<AdminResponse>> {
    Ok(Json(service(&state).update(&admin, id, request).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
) -> Result<Json<AdminResponse>> {
    Ok(Json(service(&state).remove(&admin, id).await?))
}

/// Available to every authenticated admin, not just superadmins.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<AdminResponse>> {
    Ok(Json(service(&state).change_password(&admin, request).await?))
}

pub async fn logs(State(state): State<AppState>) -> Result<Json<Vec<AuditEntryResponse>>> {
    Ok(Json(state.audit.list().await?))
}
