//! HTTP API: router, shared state and the serve loop.

pub mod error;
pub mod extract;
pub mod rates;
pub mod transactions;

use crate::core::config::AppConfig;
use crate::providers::RateCache;
use crate::store::TransactionStore;
use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub const EXCHANGE_RATES: &str = "/api/exchange-rates";
pub const CURRENCIES: &str = "/api/currencies";
pub const CATEGORIES: &str = "/api/categories";
pub const TRANSACTIONS: &str = "/api/transactions";
pub const TRANSACTION: &str = "/api/transactions/{id}";
pub const BALANCE: &str = "/api/balance";

#[derive(Clone)]
pub struct AppState {
    pub rates: RateCache,
    pub store: Arc<dyn TransactionStore>,
    pub display_currency: String,
    pub page_size: u64,
}

impl AppState {
    pub fn new(rates: RateCache, store: Arc<dyn TransactionStore>, config: &AppConfig) -> Self {
        Self {
            rates,
            store,
            display_currency: config.currency.clone(),
            page_size: config.page_size,
        }
    }
}

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(EXCHANGE_RATES, get(rates::get_exchange_rates))
        .route(CURRENCIES, get(rates::get_currencies))
        .route(CATEGORIES, get(transactions::list_categories))
        .route(
            TRANSACTIONS,
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            TRANSACTION,
            put(transactions::update_transaction).delete(transactions::delete_transaction),
        )
        .route(BALANCE, get(transactions::get_balance))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `router` on the configured address until Ctrl-C is received.
pub async fn serve(config: &AppConfig, router: Router) -> Result<()> {
    let listener = TcpListener::bind(&config.server.address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.address))?;

    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Received shutdown signal, stopping server");
}
