//! Category endpoints. Create and update take multipart bodies because of
//! the image upload; the image is mandatory on create only.

use axum::extract::{Multipart, Path, State};
use axum::{Extension, Json};

use entity::categories;

use crate::auth::middleware::CurrentAdmin;
use crate::error::Result;
use crate::handlers::{read_multipart, require_field};
use crate::server::AppState;
use crate::services::categories::{
    CategoryResponse, CategoryService, CreateCategoryRequest, UpdateCategoryRequest,
};

fn service(state: &AppState) -> CategoryService {
    CategoryService::new(state.db.clone(), state.audit.clone(), state.storage.clone())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    multipart: Multipart,
) -> Result<Json<categories::Model>> {
    let form = read_multipart(multipart).await?;
    let request = CreateCategoryRequest {
        name_ru: require_field(&form.fields, "name_ru")?,
        name_en: require_field(&form.fields, "name_en")?,
        name_uz: require_field(&form.fields, "name_uz")?,
        name_kz: require_field(&form.fields, "name_kz")?,
    };
    let image = form.require_file("image")?;

    Ok(Json(service(&state).create(&admin, request, image).await?))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>> {
    Ok(Json(service(&state).list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>> {
    Ok(Json(service(&state).get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<categories::Model>> {
    let form = read_multipart(multipart).await?;
    let request = UpdateCategoryRequest {
        name_ru: form.fields.get("name_ru").cloned(),
        name_en: form.fields.get("name_en").cloned(),
        name_uz: form.fields.get("name_uz").cloned(),
        name_kz: form.fields.get("name_kz").cloned(),
    };

    Ok(Json(
        service(&state).update(&admin, id, request, form.file).await?,
    ))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
) -> Result<Json<categories::Model>> {
    Ok(Json(service(&state).remove(&admin, id).await?))
}
