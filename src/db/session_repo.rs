use sqlx::PgPool;

use crate::models::{RecentTrade, TradeRequest, TradeResult, TradingSession};

use super::user_repo;

/// Most sessions returned for a single wallet.
pub const WALLET_HISTORY_LIMIT: i64 = 50;

/// Persist a calculated trade for a wallet in one transaction:
/// upsert the user, insert the session, commit. Any failure rolls back.
pub async fn save_session(
    pool: &PgPool,
    wallet_address: &str,
    req: &TradeRequest,
    result: &TradeResult,
) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    let user = user_repo::upsert_user(&mut tx, wallet_address).await?;

    sqlx::query(
        r#"
        INSERT INTO trading_sessions
            (user_id, entry_price, stop_loss, take_profit, position_size, leverage,
             currency_pair, calculated_profit, calculated_loss, risk_reward_ratio)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(user.id)
    .bind(req.entry_price)
    .bind(req.stop_loss)
    .bind(req.take_profit)
    .bind(req.position_size)
    .bind(req.leverage)
    .bind(&req.currency_pair)
    .bind(result.profit)
    .bind(result.loss)
    .bind(result.risk_reward_ratio)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(wallet = %user.wallet_address, pair = %req.currency_pair, "Trading session saved");
    Ok(())
}

/// Up to `limit` sessions of one wallet, newest first.
pub async fn get_history_by_wallet(
    pool: &PgPool,
    wallet_address: &str,
    limit: i64,
) -> anyhow::Result<Vec<TradingSession>> {
    let sessions = sqlx::query_as::<_, TradingSession>(
        r#"
        SELECT ts.id, ts.entry_price, ts.stop_loss, ts.take_profit, ts.position_size,
               ts.leverage, ts.currency_pair,
               ts.calculated_profit AS profit,
               ts.calculated_loss AS loss,
               ts.risk_reward_ratio, ts.created_at
        FROM trading_sessions ts
        JOIN users u ON ts.user_id = u.id
        WHERE u.wallet_address = $1
        ORDER BY ts.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(wallet_address.to_lowercase())
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// The N most recent sessions across all wallets.
pub async fn get_recent(pool: &PgPool, limit: i64) -> anyhow::Result<Vec<RecentTrade>> {
    let trades = sqlx::query_as::<_, RecentTrade>(
        r#"
        SELECT ts.entry_price, ts.stop_loss, ts.take_profit, ts.position_size,
               ts.leverage, ts.currency_pair,
               ts.calculated_profit AS profit,
               ts.calculated_loss AS loss,
               ts.risk_reward_ratio, ts.created_at,
               u.wallet_address
        FROM trading_sessions ts
        JOIN users u ON ts.user_id = u.id
        ORDER BY ts.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(trades)
}
