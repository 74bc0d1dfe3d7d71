//! Best-effort current price lookup. Sources are tried one after another
//! in a fixed order; the static table always answers last.

pub mod binance;
pub mod chainlink;
pub mod coingecko;
pub mod oracle;
pub mod static_table;

pub use binance::BinanceSource;
pub use chainlink::ChainlinkSource;
pub use coingecko::CoinGeckoSource;
pub use oracle::PriceOracle;
pub use static_table::StaticPriceTable;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::CurrencyPair;
use crate::web3::RpcError;

#[derive(Debug, Error)]
pub enum PriceSourceError {
    #[error("no {provider} mapping for {pair}")]
    Unsupported { provider: &'static str, pair: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// A fallible supplier of the current price of a pair.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, pair: &CurrencyPair) -> Result<Decimal, PriceSourceError>;
}
