use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{PriceSource, PriceSourceError};
use crate::models::CurrencyPair;
use crate::web3::JsonRpcClient;

/// Selector of `latestRoundData()`.
const LATEST_ROUND_DATA: &str = "0xfeaf968c";

/// Chainlink USD feeds report 8 decimals.
const FEED_DECIMALS: u32 = 8;

/// Ethereum mainnet aggregator proxies.
fn feed_address(pair: &CurrencyPair) -> Option<&'static str> {
    match pair.to_string().as_str() {
        "BTC/USD" => Some("0xF4030086522a5bEEa4988F8cA5B36dbC97BeE88c"),
        "ETH/USD" => Some("0x5f4eC3Df9cbd43714FE2740f5E3616155c5b8419"),
        "SOL/USD" => Some("0x4ffC43a60e009B551865A93d232E1F8dAa817A03"),
        _ => None,
    }
}

/// On-chain price feed read through the configured JSON-RPC provider.
#[derive(Debug, Clone)]
pub struct ChainlinkSource {
    rpc: Arc<JsonRpcClient>,
}

impl ChainlinkSource {
    pub fn new(rpc: Arc<JsonRpcClient>) -> Self {
        Self { rpc }
    }
}

/// Extract `answer` (second 32-byte word, int256) from `latestRoundData`
/// return data and scale it by the feed decimals.
fn decode_answer(data: &[u8]) -> Result<Decimal, PriceSourceError> {
    let word = data
        .get(32..64)
        .ok_or_else(|| PriceSourceError::Unexpected(format!("short return data: {} bytes", data.len())))?;

    // Negative or wider than 128 bits is never a sane price.
    if word[..16].iter().any(|b| *b != 0) {
        return Err(PriceSourceError::Unexpected("answer out of range".into()));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    let raw = i128::try_from(u128::from_be_bytes(low))
        .map_err(|_| PriceSourceError::Unexpected("answer out of range".into()))?;

    Decimal::try_from_i128_with_scale(raw, FEED_DECIMALS)
        .map_err(|e| PriceSourceError::Unexpected(format!("answer out of range: {e}")))
}

#[async_trait]
impl PriceSource for ChainlinkSource {
    fn name(&self) -> &'static str {
        "chainlink"
    }

    async fn fetch(&self, pair: &CurrencyPair) -> Result<Decimal, PriceSourceError> {
        let feed = feed_address(pair).ok_or_else(|| PriceSourceError::Unsupported {
            provider: self.name(),
            pair: pair.to_string(),
        })?;

        let data = self.rpc.eth_call(feed, LATEST_ROUND_DATA).await?;
        decode_answer(&data)
    }
}
