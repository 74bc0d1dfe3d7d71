use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{PriceSource, PriceSourceError};
use crate::models::CurrencyPair;

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: Decimal,
}

/// Binance public spot ticker.
#[derive(Debug, Clone)]
pub struct BinanceSource {
    http: Client,
    base_url: String,
}

impl BinanceSource {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PriceSource for BinanceSource {
    fn name(&self) -> &'static str {
        "binance"
    }

    async fn fetch(&self, pair: &CurrencyPair) -> Result<Decimal, PriceSourceError> {
        let url = format!(
            "{}/api/v3/ticker/price?symbol={}",
            self.base_url.trim_end_matches('/'),
            pair.symbol()
        );
        let ticker: TickerPrice = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(ticker.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_parses_string_price() {
        let ticker: TickerPrice =
            serde_json::from_str(r#"{"symbol":"BTCUSDT","price":"64123.45000000"}"#).unwrap();
        assert_eq!(ticker.price, Decimal::new(6412345, 2));
    }
}
