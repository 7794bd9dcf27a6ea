use crate::api::{bearer_token, AppState};
use crate::domain::WalletsData;
use crate::error::AppError;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

/// Wallet balances annotated with unrealized gain/loss per held currency.
pub async fn get_wallets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<WalletsData>, AppError> {
    let token = bearer_token(&headers)?;
    let data = state.wallets.get_wallets(&token).await?;
    Ok(Json(data))
}
