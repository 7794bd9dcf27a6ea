use crate::api::{bearer_token, AppState};
use crate::domain::ExchangeRatesData;
use crate::error::AppError;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

pub async fn get_exchange_rates(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ExchangeRatesData>, AppError> {
    let token = bearer_token(&headers)?;
    let rates = state.exchange.fetch_rates(&token).await?;
    Ok(Json(ExchangeRatesData::from_rates(rates)))
}
