pub mod health;
pub mod orders;
pub mod rates;
pub mod wallets;

use crate::config::Config;
use crate::datasource::ExchangeApi;
use crate::error::AppError;
use crate::orchestration::WalletAggregator;
use axum::http::{header, HeaderMap};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub exchange: Arc<dyn ExchangeApi>,
    pub wallets: Arc<WalletAggregator>,
}

impl AppState {
    pub fn new(config: Config, exchange: Arc<dyn ExchangeApi>) -> Self {
        let wallets = Arc::new(WalletAggregator::new(exchange.clone()));
        Self {
            config,
            exchange,
            wallets,
        }
    }
}

/// Extract the caller's bearer token to forward upstream unchanged.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/wallets", get(wallets::get_wallets))
        .route("/v1/exchange-rates", get(rates::get_exchange_rates))
        .route(
            "/v1/orders",
            get(orders::get_orders).post(orders::create_order),
        )
        .route("/v1/orders/quote", get(orders::get_quote))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
