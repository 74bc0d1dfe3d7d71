use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;
use super::rate_limit::enforce_rate_limit;

pub fn create_router(state: AppState) -> Router {
    // Operational routes — exempt from rate limiting
    let public = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::scrape));

    // API routes — fixed-window rate limit per client IP
    let limited = Router::new()
        // Trades
        .route("/api/trades/calculate", post(handlers::trades::calculate_trade))
        .route("/api/trades/history/:wallet_address", get(handlers::trades::history))
        .route("/api/trades/recent", get(handlers::trades::recent))
        // Prices
        .route("/api/prices/history/:currency_pair", get(handlers::prices::history))
        .route("/api/prices/:currency_pair", get(handlers::prices::current))
        // Web3
        .route("/api/web3/status", get(handlers::web3::status))
        .layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            enforce_rate_limit,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(limited)
        .fallback(not_found)
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Route not found",
            "path": uri.path(),
            "method": method.as_str(),
        })),
    )
}
