//! Carousel banner endpoints.

use axum::extract::{Multipart, Path, State};
use axum::{Extension, Json};

use entity::carousel_items;

use crate::auth::middleware::CurrentAdmin;
use crate::error::Result;
use crate::handlers::read_multipart;
use crate::server::AppState;
use crate::services::carousel::CarouselService;

fn service(state: &AppState) -> CarouselService {
    CarouselService::new(state.db.clone(), state.audit.clone(), state.storage.clone())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    multipart: Multipart,
) -> Result<Json<carousel_items::Model>> {
    let file = read_multipart(multipart).await?.require_file("file")?;
    Ok(Json(service(&state).create(&admin, file).await?))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<carousel_items::Model>>> {
    Ok(Json(service(&state).list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<carousel_items::Model>> {
    Ok(Json(service(&state).get(id).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
) -> Result<Json<carousel_items::Model>> {
    Ok(Json(service(&state).remove(&admin, id).await?))
}
