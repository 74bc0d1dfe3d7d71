use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;

use super::{PriceSource, PriceSourceError};
use crate::models::CurrencyPair;

type SimplePrice = HashMap<String, HashMap<String, Decimal>>;

/// CoinGecko `simple/price` endpoint, USD-quoted pairs only.
#[derive(Debug, Clone)]
pub struct CoinGeckoSource {
    http: Client,
    base_url: String,
}

impl CoinGeckoSource {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

fn coin_id(pair: &CurrencyPair) -> Option<&'static str> {
    match pair.to_string().as_str() {
        "BTC/USD" => Some("bitcoin"),
        "ETH/USD" => Some("ethereum"),
        "SOL/USD" => Some("solana"),
        _ => None,
    }
}

fn extract_usd(body: &SimplePrice, id: &str) -> Result<Decimal, PriceSourceError> {
    body.get(id)
        .and_then(|prices| prices.get("usd"))
        .copied()
        .ok_or_else(|| PriceSourceError::Unexpected(format!("no usd price for {id}")))
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch(&self, pair: &CurrencyPair) -> Result<Decimal, PriceSourceError> {
        let id = coin_id(pair).ok_or_else(|| PriceSourceError::Unsupported {
            provider: self.name(),
            pair: pair.to_string(),
        })?;

        let url = format!(
            "{}/api/v3/simple/price?ids={id}&vs_currencies=usd",
            self.base_url.trim_end_matches('/')
        );
        let body: SimplePrice = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        extract_usd(&body, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_usd() {
        let body: SimplePrice = serde_json::from_str(r#"{"ethereum":{"usd":3012.5}}"#).unwrap();
        assert_eq!(extract_usd(&body, "ethereum").unwrap(), Decimal::new(30125, 1));
        assert!(extract_usd(&body, "bitcoin").is_err());
    }

    #[test]
    fn test_coin_id_mapping() {
        let sol = CurrencyPair::from_api_str("SOL/USD").unwrap();
        let sol_eur = CurrencyPair::from_api_str("SOL/EUR").unwrap();
        assert_eq!(coin_id(&sol), Some("solana"));
        assert_eq!(coin_id(&sol_eur), None);
    }
}
