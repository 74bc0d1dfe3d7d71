use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use metrics::counter;
use serde::Deserialize;

use crate::calculation::{calculate, validate};
use crate::db::session_repo;
use crate::errors::AppError;
use crate::models::{RecentTrade, TradeInput, TradeResult, TradingSession};
use crate::web3::is_valid_address;
use crate::AppState;

use super::ApiResponse;

const DEFAULT_RECENT_LIMIT: i64 = 20;
const MAX_RECENT_LIMIT: i64 = 100;

#[derive(Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

/// POST /api/trades/calculate — validate, calculate, optionally persist
pub async fn calculate_trade(
    State(state): State<AppState>,
    body: Result<Json<TradeInput>, JsonRejection>,
) -> Result<Json<ApiResponse<TradeResult>>, AppError> {
    let Json(input) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let missing = input.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let mut details: Vec<String> = validate(&input).iter().map(ToString::to_string).collect();
    let wallet = input
        .wallet_address
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty());
    if wallet.is_some_and(|w| !is_valid_address(w)) {
        details.push("Invalid wallet address".into());
    }
    if !details.is_empty() {
        counter!("trade_validation_failures_total").increment(1);
        return Err(AppError::Validation(details));
    }

    let request = input
        .to_request()
        .ok_or_else(|| AppError::BadRequest("incomplete trade request".into()))?;
    let result = calculate(&request)?;
    counter!("trade_calculations_total").increment(1);

    tracing::debug!(
        pair = %request.currency_pair,
        direction = ?request.direction(),
        profit = %result.profit,
        loss = %result.loss,
        "Trade calculated"
    );

    if let Some(wallet) = wallet {
        session_repo::save_session(&state.db, wallet, &request, &result).await?;
        counter!("trade_sessions_saved_total").increment(1);
    }

    Ok(Json(ApiResponse {
        message: Some("Trade calculated successfully".into()),
        ..ApiResponse::ok(result)
    }))
}

/// GET /api/trades/history/{wallet} — latest sessions for one wallet
pub async fn history(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<ApiResponse<Vec<TradingSession>>>, AppError> {
    let wallet_address = wallet_address.trim();
    if wallet_address.is_empty() {
        return Err(AppError::BadRequest("Wallet address is required".into()));
    }

    let sessions = session_repo::get_history_by_wallet(
        &state.db,
        wallet_address,
        session_repo::WALLET_HISTORY_LIMIT,
    )
    .await?;

    Ok(Json(ApiResponse {
        count: Some(sessions.len()),
        ..ApiResponse::ok(sessions)
    }))
}

/// GET /api/trades/recent?limit=N — latest sessions across wallets
pub async fn recent(
    State(state): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<RecentTrade>>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    let trades = session_repo::get_recent(&state.db, limit).await?;

    Ok(Json(ApiResponse::ok(trades)))
}
