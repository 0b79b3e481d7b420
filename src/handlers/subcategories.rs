//! Subcategory endpoints.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use entity::subcategories;

use crate::auth::middleware::CurrentAdmin;
use crate::error::Result;
use crate::server::AppState;
use crate::services::subcategories::{
    CreateSubcategoryRequest, SubcategoryResponse, SubcategoryService, UpdateSubcategoryRequest,
};

fn service(state: &AppState) -> SubcategoryService {
    SubcategoryService::new(state.db.clone(), state.audit.clone())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(request): Json<CreateSubcategoryRequest>,
) -> Result<Json<subcategories::Model>> {
    Ok(Json(service(&state).create(&admin, request).await?))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SubcategoryResponse>>> {
    Ok(Json(service(&state).list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubcategoryResponse>> {
    Ok(Json(service(&state).get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateSubcategoryRequest>,
) -> Result<Json<subcategories::Model>> {
    Ok(Json(service(&state).update(&admin, id, request).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
) -> Result<Json<subcategories::Model>> {
    Ok(Json(service(&state).remove(&admin, id).await?))
}
