//! Tests against a live Postgres (`TEST_DATABASE_URL`).
//! Run with `cargo test -- --ignored`. Tests take a shared lock in
//! `setup_test_db`, so they do not race on the table wipes.

mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

use common::{build_app, get, post_json, send, setup_test_db};
use trade_calculator::calculation::calculate;
use trade_calculator::db::{price_repo, session_repo};
use trade_calculator::models::TradeRequest;

const WALLET: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

fn request(entry: i64, stop: i64, take: i64) -> TradeRequest {
    TradeRequest {
        entry_price: Decimal::from(entry),
        stop_loss: Decimal::from(stop),
        take_profit: Decimal::from(take),
        position_size: Decimal::from(1000),
        leverage: Decimal::ONE,
        currency_pair: "BTC/USD".into(),
    }
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_save_session_and_read_history() {
    let (pool, _db) = setup_test_db().await;
    let req = request(100, 90, 120);
    let result = calculate(&req).unwrap();

    session_repo::save_session(&pool, WALLET, &req, &result)
        .await
        .expect("save should succeed");

    // Lookup is case-insensitive on the address
    let history = session_repo::get_history_by_wallet(&pool, &WALLET.to_lowercase(), 50)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].profit, Decimal::from(200));
    assert_eq!(history[0].loss, Decimal::from(-100));
    assert_eq!(history[0].risk_reward_ratio, Decimal::from(2));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_same_wallet_reuses_user() {
    let (pool, _db) = setup_test_db().await;
    let req = request(100, 110, 80);
    let result = calculate(&req).unwrap();

    session_repo::save_session(&pool, WALLET, &req, &result).await.unwrap();
    session_repo::save_session(&pool, &WALLET.to_uppercase().replace("0X", "0x"), &req, &result)
        .await
        .unwrap();

    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 1);

    let history = session_repo::get_history_by_wallet(&pool, WALLET, 50).await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_setup_serializes_database_tests() {
    let (pool, guard) = setup_test_db().await;

    // While the guard is held a second setup must wait.
    let second = tokio::time::timeout(std::time::Duration::from_millis(200), setup_test_db()).await;
    assert!(second.is_err());

    drop(guard);
    let (_, _db) = setup_test_db().await;
    pool.close().await;
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_calculate_with_wallet_persists_and_lists() {
    let (pool, _db) = setup_test_db().await;
    let app = build_app(pool.clone(), |_| {});

    let body = json!({
        "entryPrice": 100,
        "stopLoss": 90,
        "takeProfit": 120,
        "positionSize": 1000,
        "currencyPair": "BTC/USD",
        "walletAddress": WALLET
    });
    let (resp, _) = send(&app, post_json("/api/trades/calculate", &body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (resp, json) = send(&app, get(&format!("/api/trades/history/{WALLET}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["currencyPair"], "BTC/USD");

    let (resp, json) = send(&app, get("/api/trades/recent?limit=5")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json["data"][0]["walletAddress"], WALLET.to_lowercase());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_recent_is_newest_first_and_limited() {
    let (pool, _db) = setup_test_db().await;
    for take in [110, 120, 130] {
        let req = request(100, 90, take);
        let result = calculate(&req).unwrap();
        session_repo::save_session(&pool, WALLET, &req, &result).await.unwrap();
    }

    let recent = session_repo::get_recent(&pool, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent[0].created_at >= recent[1].created_at);
    assert_eq!(recent[0].take_profit, Decimal::from(130));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_price_lookup_falls_back_and_is_logged() {
    let (pool, _db) = setup_test_db().await;
    let app = build_app(pool.clone(), |_| {});

    // All remote sources point at a closed port, so the static table answers.
    let (resp, json) = send(&app, get("/api/prices/btc-usd")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json["data"]["currencyPair"], "BTC/USD");
    assert_eq!(json["data"]["price"], "45000");
    assert_eq!(json["data"]["source"], "static");

    let history = price_repo::get_price_history(&pool, "BTC/USD", 1).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].source, "static");

    let (resp, json) = send(&app, get("/api/prices/history/BTC-USD?hours=2")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json["count"], 1);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_health_check() {
    let (pool, _db) = setup_test_db().await;
    let app = build_app(pool, |_| {});

    let (resp, json) = send(&app, get("/api/health")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["services"]["database"], "connected");
}
