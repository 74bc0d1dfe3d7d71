pub mod price;
pub mod trade;
pub mod user;

pub use price::{PriceFeed, PriceQuote};
pub use trade::{RecentTrade, TradeDirection, TradeInput, TradeRequest, TradeResult, TradingSession};
pub use user::User;

use std::fmt;

// ---------------------------------------------------------------------------
// CurrencyPair
// ---------------------------------------------------------------------------

/// Normalized `BASE/QUOTE` pair, e.g. `BTC/USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Parse `BTC/USD`, `btc-usd` or `BTC_USD`. Each leg must be 3-10 ASCII letters.
    pub fn from_api_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', '_'], "/");
        let (base, quote) = normalized.split_once('/')?;
        if !is_valid_leg(base) || !is_valid_leg(quote) {
            return None;
        }
        Some(Self {
            base: base.to_string(),
            quote: quote.to_string(),
        })
    }

    /// Concatenated exchange symbol, e.g. `BTCUSD`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

fn is_valid_leg(leg: &str) -> bool {
    (3..=10).contains(&leg.len()) && leg.chars().all(|c| c.is_ascii_uppercase())
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_normalization() {
        let pair = CurrencyPair::from_api_str("btc-usd").unwrap();
        assert_eq!(pair.to_string(), "BTC/USD");
        assert_eq!(pair.symbol(), "BTCUSD");
        assert_eq!(CurrencyPair::from_api_str("eth_usdt").unwrap().to_string(), "ETH/USDT");
    }

    #[test]
    fn test_pair_rejects_malformed() {
        assert!(CurrencyPair::from_api_str("BTCUSD").is_none());
        assert!(CurrencyPair::from_api_str("BT/USD").is_none());
        assert!(CurrencyPair::from_api_str("BTC/US1").is_none());
        assert!(CurrencyPair::from_api_str("BTC/USD/EUR").is_none());
    }
}
