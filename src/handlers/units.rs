//! Measurement unit endpoints.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use entity::units;

use crate::auth::middleware::CurrentAdmin;
use crate::error::Result;
use crate::server::AppState;
use crate::services::units::{CreateUnitRequest, UnitService, UpdateUnitRequest};

fn service(state: &AppState) -> UnitService {
    UnitService::new(state.db.clone(), state.audit.clone())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(request): Json<CreateUnitRequest>,
) -> Result<Json<units::Model>> {
    Ok(Json(service(&state).create(&admin, request).await?))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<units::Model>>> {
    Ok(Json(service(&state).list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<units::Model>> {
    Ok(Json(service(&state).get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUnitRequest>,
) -> Result<Json<units::Model>> {
    Ok(Json(service(&state).update(&admin, id, request).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
) -> Result<Json<units::Model>> {
    Ok(Json(service(&state).remove(&admin, id).await?))
}
