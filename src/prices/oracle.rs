use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use reqwest::Client;
use rust_decimal::Decimal;

use super::{BinanceSource, ChainlinkSource, CoinGeckoSource, PriceSource, StaticPriceTable};
use crate::config::AppConfig;
use crate::models::{CurrencyPair, PriceQuote};
use crate::web3::JsonRpcClient;

/// Ordered list of fallible suppliers with the static table as the
/// terminal one. Sources are tried sequentially, never in parallel.
pub struct PriceOracle {
    sources: Vec<Box<dyn PriceSource>>,
    fallback: StaticPriceTable,
}

impl PriceOracle {
    pub fn new(sources: Vec<Box<dyn PriceSource>>) -> Self {
        Self {
            sources,
            fallback: StaticPriceTable,
        }
    }

    /// Chainlink, then Binance, then CoinGecko.
    pub fn from_config(config: &AppConfig, rpc: Arc<JsonRpcClient>) -> anyhow::Result<Self> {
        let http = http_client(config.price_timeout)?;
        let sources: Vec<Box<dyn PriceSource>> = vec![
            Box::new(ChainlinkSource::new(rpc)) as Box<dyn PriceSource>,
            Box::new(BinanceSource::new(http.clone(), config.binance_api_url.clone())),
            Box::new(CoinGeckoSource::new(http, config.coingecko_api_url.clone())),
        ];
        Ok(Self::new(sources))
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// First positive price from the ordered sources, else the static table.
    pub async fn current_price(&self, pair: &CurrencyPair) -> PriceQuote {
        let started = Instant::now();

        for source in &self.sources {
            match source.fetch(pair).await {
                Ok(price) if price > Decimal::ZERO => {
                    tracing::info!(source = source.name(), pair = %pair, %price, "Price fetched");
                    counter!("price_lookups_total", "source" => source.name()).increment(1);
                    histogram!("price_lookup_seconds").record(started.elapsed().as_secs_f64());
                    return PriceQuote {
                        price,
                        source: source.name().to_string(),
                    };
                }
                Ok(price) => {
                    tracing::warn!(source = source.name(), pair = %pair, %price, "Non-positive price ignored");
                    counter!("price_source_failures_total", "source" => source.name()).increment(1);
                }
                Err(e) => {
                    tracing::warn!(source = source.name(), pair = %pair, error = %e, "Price source failed");
                    counter!("price_source_failures_total", "source" => source.name()).increment(1);
                }
            }
        }

        let price = self.fallback.price(pair);
        tracing::warn!(pair = %pair, %price, "All price sources failed, using static table");
        counter!("price_lookups_total", "source" => StaticPriceTable::NAME).increment(1);
        histogram!("price_lookup_seconds").record(started.elapsed().as_secs_f64());
        PriceQuote {
            price,
            source: StaticPriceTable::NAME.to_string(),
        }
    }
}

/// Shared outbound HTTP client with a request timeout.
pub fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    install_crypto_provider();
    Ok(Client::builder().timeout(timeout).build()?)
}

/// rustls needs one process-wide provider when several are compiled in.
/// Repeat installs are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
