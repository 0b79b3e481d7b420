//! Currency rate endpoint.

use axum::Json;
use axum::extract::State;

use crate::error::Result;
use crate::server::AppState;
use crate::services::currency::{CurrencyRates, CurrencyService};

pub async fn usd_rates(State(state): State<AppState>) -> Result<Json<CurrencyRates>> {
    let service = CurrencyService::new(state.http.clone(), state.config.currency.url.clone());
    Ok(Json(service.usd_rates().await?))
}
