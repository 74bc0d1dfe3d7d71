use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A current price together with the supplier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub price: Decimal,
    pub source: String,
}

/// Row of `price_feeds`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PriceFeed {
    pub currency_pair: String,
    pub price: Decimal,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}
