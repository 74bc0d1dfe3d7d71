use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::PriceFeed;

/// Record a price sample.
pub async fn insert_price_feed(
    pool: &PgPool,
    currency_pair: &str,
    price: Decimal,
    source: &str,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO price_feeds (currency_pair, price, source) VALUES ($1, $2, $3)")
        .bind(currency_pair)
        .bind(price)
        .bind(source)
        .execute(pool)
        .await?;

    Ok(())
}

/// Samples for a pair within the last `hours`, newest first.
pub async fn get_price_history(
    pool: &PgPool,
    currency_pair: &str,
    hours: i32,
) -> anyhow::Result<Vec<PriceFeed>> {
    let feeds = sqlx::query_as::<_, PriceFeed>(
        r#"
        SELECT currency_pair, price, source, timestamp
        FROM price_feeds
        WHERE currency_pair = $1 AND timestamp >= NOW() - make_interval(hours => $2)
        ORDER BY timestamp DESC
        "#,
    )
    .bind(currency_pair)
    .bind(hours)
    .fetch_all(pool)
    .await?;

    Ok(feeds)
}
