use sqlx::PgConnection;

use crate::models::User;

/// Insert the wallet's user row, or touch `updated_at` if it already exists.
/// Addresses are stored lower-cased so checksummed and plain forms share a user.
pub async fn upsert_user(conn: &mut PgConnection, wallet_address: &str) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (wallet_address)
        VALUES ($1)
        ON CONFLICT (wallet_address) DO UPDATE SET updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(wallet_address.to_lowercase())
    .fetch_one(conn)
    .await?;

    Ok(user)
}
