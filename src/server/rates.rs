//! Exchange rate and currency endpoints.

use crate::core::currency::{CURRENCIES, CurrencyDescriptor};
use crate::core::rates::RateTable;
use crate::server::{AppState, error::ApiError};
use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// How long intermediate caches may keep a rates response, in seconds.
pub const RATES_MAX_AGE_SECS: u32 = 3600;

#[derive(Debug, Serialize)]
pub struct RatesResponse {
    pub rates: RateTable,
}

/// Returns the current rate table, served from the rate cache.
pub async fn get_exchange_rates(State(state): State<AppState>) -> Result<Response, ApiError> {
    let rates = state.rates.get_rates().await;

    if let Err(e) = rates.validate() {
        tracing::error!(error = %e, "Refusing to serve invalid rate table");
        return Err(ApiError::Internal("Failed to fetch rates".to_string()));
    }

    let cache_control = format!("public, max-age={RATES_MAX_AGE_SECS}");
    Ok((
        [(header::CACHE_CONTROL, cache_control)],
        Json(RatesResponse {
            rates: RateTable::clone(&rates),
        }),
    )
        .into_response())
}

pub async fn get_currencies() -> Json<&'static [CurrencyDescriptor]> {
    Json(&CURRENCIES)
}
