//! Dashboard summary endpoint.

use axum::Json;
use axum::extract::State;

use crate::error::Result;
use crate::server::AppState;
use crate::services::dashboard::{DashboardService, DashboardSummary};

pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>> {
    Ok(Json(DashboardService::new(state.db.clone()).summary().await?))
}
