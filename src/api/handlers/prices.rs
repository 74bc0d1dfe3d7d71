use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::price_repo;
use crate::errors::AppError;
use crate::models::{CurrencyPair, PriceFeed};
use crate::AppState;

use super::ApiResponse;

const DEFAULT_HISTORY_HOURS: i32 = 24;
const MAX_HISTORY_HOURS: i32 = 24 * 30;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPrice {
    pub currency_pair: String,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub hours: Option<i32>,
}

fn parse_pair(raw: &str) -> Result<CurrencyPair, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("Currency pair is required".into()));
    }
    CurrencyPair::from_api_str(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid currency pair: {raw}")))
}

/// GET /api/prices/{pair} — current price; the sample is logged best-effort
pub async fn current(
    State(state): State<AppState>,
    Path(raw_pair): Path<String>,
) -> Result<Json<ApiResponse<CurrentPrice>>, AppError> {
    let pair = parse_pair(&raw_pair)?;
    let quote = state.price_oracle.current_price(&pair).await;

    if let Err(e) =
        price_repo::insert_price_feed(&state.db, &pair.to_string(), quote.price, &quote.source).await
    {
        tracing::warn!(pair = %pair, error = %e, "Failed to record price feed");
    }

    Ok(Json(ApiResponse::ok(CurrentPrice {
        currency_pair: pair.to_string(),
        price: quote.price,
        timestamp: Utc::now(),
        source: quote.source,
    })))
}

/// GET /api/prices/history/{pair}?hours=N — recorded samples, newest first
pub async fn history(
    State(state): State<AppState>,
    Path(raw_pair): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<PriceFeed>>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let pair = parse_pair(&raw_pair)?;
    let hours = query
        .hours
        .unwrap_or(DEFAULT_HISTORY_HOURS)
        .clamp(1, MAX_HISTORY_HOURS);

    let feeds = price_repo::get_price_history(&state.db, &pair.to_string(), hours).await?;

    Ok(Json(ApiResponse {
        count: Some(feeds.len()),
        ..ApiResponse::ok(feeds)
    }))
}
