//! Product endpoints, including the nested file routes.

use axum::extract::{Multipart, Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use entity::product_files;

use crate::auth::middleware::CurrentAdmin;
use crate::error::Result;
use crate::handlers::read_multipart;
use crate::server::AppState;
use crate::services::products::{
    CreateProductRequest, ProductResponse, ProductService, UpdateFileOrderRequest,
    UpdateProductRequest,
};

#[derive(Debug, Deserialize)]
pub struct AddFileQuery {
    #[serde(default, rename = "isVideo")]
    pub is_video: bool,
}

fn service(state: &AppState) -> ProductService {
    ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>> {
    Ok(Json(service(&state).create(&admin, request).await?))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    Ok(Json(service(&state).list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    Ok(Json(service(&state).get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>> {
    Ok(Json(service(&state).update(&admin, id, request).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    Ok(Json(service(&state).remove(&admin, id).await?))
}

/// `POST /products/{id}/files?isVideo=` with a multipart file part.
pub async fn add_file(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
    Query(query): Query<AddFileQuery>,
    multipart: Multipart,
) -> Result<Json<product_files::Model>> {
    let file = read_multipart(multipart).await?.require_file("file")?;
    Ok(Json(
        service(&state)
            .add_file(&admin, id, file, query.is_video)
            .await?,
    ))
}

pub async fn remove_file(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path((product_id, file_id)): Path<(i32, i32)>,
) -> Result<Json<serde_json::Value>> {
    service(&state)
        .remove_file(&admin, product_id, file_id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn reorder_files(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(product_id): Path<i32>,
    Json(request): Json<UpdateFileOrderRequest>,
) -> Result<Json<serde_json::Value>> {
    service(&state)
        .reorder_files(&admin, product_id, request)
        .await?;
    Ok(Json(serde_json::json!({ "updated": true })))
}
