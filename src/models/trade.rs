use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Raw `POST /calculate` body. Every field is optional so that the
/// validator can report absent values instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInput {
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    #[serde(default)]
    pub take_profit: Option<Decimal>,
    #[serde(default)]
    pub position_size: Option<Decimal>,
    #[serde(default)]
    pub leverage: Option<Decimal>,
    #[serde(default)]
    pub currency_pair: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
}

impl TradeInput {
    /// Names of required fields that are absent (or blank, for the pair).
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.entry_price.is_none() {
            missing.push("entryPrice");
        }
        if self.stop_loss.is_none() {
            missing.push("stopLoss");
        }
        if self.take_profit.is_none() {
            missing.push("takeProfit");
        }
        if self.position_size.is_none() {
            missing.push("positionSize");
        }
        if self
            .currency_pair
            .as_deref()
            .map_or(true, |p| p.trim().is_empty())
        {
            missing.push("currencyPair");
        }
        missing
    }

    /// Build a complete request, defaulting leverage to 1.
    /// Returns `None` when any required field is missing.
    pub fn to_request(&self) -> Option<TradeRequest> {
        Some(TradeRequest {
            entry_price: self.entry_price?,
            stop_loss: self.stop_loss?,
            take_profit: self.take_profit?,
            position_size: self.position_size?,
            leverage: self.leverage.unwrap_or(Decimal::ONE),
            currency_pair: self
                .currency_pair
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())?
                .to_string(),
        })
    }
}

/// A complete trade description handed to the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub position_size: Decimal,
    pub leverage: Decimal,
    pub currency_pair: String,
}

impl TradeRequest {
    /// Classify the setup by the ordering of its three price levels.
    pub fn direction(&self) -> Option<TradeDirection> {
        TradeDirection::classify(self.entry_price, self.stop_loss, self.take_profit)
    }
}

// ---------------------------------------------------------------------------
// TradeDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Long,
    Short,
}

impl TradeDirection {
    /// `Long` when take profit > entry > stop loss, `Short` when
    /// take profit < entry < stop loss, `None` for any other ordering.
    pub fn classify(entry: Decimal, stop_loss: Decimal, take_profit: Decimal) -> Option<Self> {
        if take_profit > entry && entry > stop_loss {
            Some(TradeDirection::Long)
        } else if take_profit < entry && entry < stop_loss {
            Some(TradeDirection::Short)
        } else {
            None
        }
    }
}

/// Outcome of a calculation. Decimals serialize as strings so the
/// 2 dp (profit/loss) and 4 dp (ratio) scale is preserved on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResult {
    pub profit: Decimal,
    pub loss: Decimal,
    pub risk_reward_ratio: Decimal,
    pub position_size: Decimal,
    pub leverage: Decimal,
    pub currency_pair: String,
}

/// Row of `trading_sessions` as returned by the wallet history query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TradingSession {
    pub id: Uuid,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub position_size: Decimal,
    pub leverage: Decimal,
    pub currency_pair: String,
    pub profit: Decimal,
    pub loss: Decimal,
    pub risk_reward_ratio: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Session joined with its owner, for the cross-wallet feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentTrade {
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub position_size: Decimal,
    pub leverage: Decimal,
    pub currency_pair: String,
    pub profit: Decimal,
    pub loss: Decimal,
    pub risk_reward_ratio: Decimal,
    pub created_at: DateTime<Utc>,
    pub wallet_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_reports_absent_and_blank() {
        let input = TradeInput {
            entry_price: Some(Decimal::from(100)),
            currency_pair: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            input.missing_fields(),
            vec!["stopLoss", "takeProfit", "positionSize", "currencyPair"]
        );
    }

    #[test]
    fn test_to_request_defaults_leverage() {
        let input = TradeInput {
            entry_price: Some(Decimal::from(100)),
            stop_loss: Some(Decimal::from(90)),
            take_profit: Some(Decimal::from(120)),
            position_size: Some(Decimal::from(1000)),
            leverage: None,
            currency_pair: Some("BTC/USD".into()),
            wallet_address: None,
        };
        let req = input.to_request().unwrap();
        assert_eq!(req.leverage, Decimal::ONE);
        assert_eq!(req.direction(), Some(TradeDirection::Long));
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_strings() {
        let input: TradeInput = serde_json::from_str(
            r#"{"entryPrice": 100, "stopLoss": "90.5", "takeProfit": 120.25, "currencyPair": "ETH/USD"}"#,
        )
        .unwrap();
        assert_eq!(input.entry_price, Some(Decimal::from(100)));
        assert_eq!(input.stop_loss, Some(Decimal::new(905, 1)));
        assert_eq!(input.take_profit, Some(Decimal::new(12025, 2)));
        assert!(input.position_size.is_none());
    }

    #[test]
    fn test_classify_rejects_flat_legs() {
        let hundred = Decimal::from(100);
        assert_eq!(TradeDirection::classify(hundred, hundred, Decimal::from(120)), None);
        assert_eq!(TradeDirection::classify(hundred, Decimal::from(90), hundred), None);
        assert_eq!(
            TradeDirection::classify(hundred, Decimal::from(110), Decimal::from(80)),
            Some(TradeDirection::Short)
        );
    }
}
