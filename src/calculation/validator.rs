use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{TradeDirection, TradeInput};

/// A single rule a trade input failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Entry price must be positive")]
    EntryPriceNotPositive,

    #[error("Stop loss must be positive")]
    StopLossNotPositive,

    #[error("Take profit must be positive")]
    TakeProfitNotPositive,

    #[error("Position size must be positive")]
    PositionSizeNotPositive,

    #[error("Leverage must be at least 1")]
    LeverageBelowOne,

    #[error(
        "Invalid trade parameters: For long positions, Take Profit > Entry > Stop Loss. \
         For short positions, Take Profit < Entry < Stop Loss."
    )]
    InvalidDirection,
}

/// Check a trade input and return every violation found, in field order.
/// An empty vector means the input is valid.
pub fn validate(input: &TradeInput) -> Vec<Violation> {
    let mut violations = Vec::new();

    let positive_checks = [
        (input.entry_price, Violation::EntryPriceNotPositive),
        (input.stop_loss, Violation::StopLossNotPositive),
        (input.take_profit, Violation::TakeProfitNotPositive),
        (input.position_size, Violation::PositionSizeNotPositive),
    ];
    for (value, violation) in positive_checks {
        if !is_positive(value) {
            violations.push(violation);
        }
    }

    if matches!(input.leverage, Some(leverage) if leverage < Decimal::ONE) {
        violations.push(Violation::LeverageBelowOne);
    }

    if let (Some(entry), Some(stop_loss), Some(take_profit)) =
        (input.entry_price, input.stop_loss, input.take_profit)
    {
        if TradeDirection::classify(entry, stop_loss, take_profit).is_none() {
            violations.push(Violation::InvalidDirection);
        }
    }

    violations
}

fn is_positive(value: Option<Decimal>) -> bool {
    value.is_some_and(|v| v > Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn input(entry: i64, stop: i64, take: i64, size: i64) -> TradeInput {
        TradeInput {
            entry_price: Some(Decimal::from(entry)),
            stop_loss: Some(Decimal::from(stop)),
            take_profit: Some(Decimal::from(take)),
            position_size: Some(Decimal::from(size)),
            leverage: None,
            currency_pair: Some("BTC/USD".into()),
            wallet_address: None,
        }
    }

    #[test]
    fn test_valid_long_has_no_violations() {
        assert!(validate(&input(100, 90, 120, 1000)).is_empty());
    }

    #[test]
    fn test_valid_short_has_no_violations() {
        assert!(validate(&input(100, 110, 80, 1000)).is_empty());
    }

    #[test]
    fn test_zero_risk_trade_rejected_once() {
        // entry == stop loss
        assert_eq!(
            validate(&input(100, 100, 120, 1000)),
            vec![Violation::InvalidDirection]
        );
    }

    #[test]
    fn test_zero_reward_trade_rejected() {
        assert_eq!(
            validate(&input(100, 90, 100, 1000)),
            vec![Violation::InvalidDirection]
        );
    }

    #[test]
    fn test_fractional_leverage_rejected() {
        let mut trade = input(100, 90, 120, 1000);
        trade.leverage = Some(Decimal::new(5, 1)); // 0.5
        assert_eq!(validate(&trade), vec![Violation::LeverageBelowOne]);
    }

    #[test]
    fn test_zero_leverage_counts_as_present() {
        let mut trade = input(100, 90, 120, 1000);
        trade.leverage = Some(Decimal::ZERO);
        assert_eq!(validate(&trade), vec![Violation::LeverageBelowOne]);
    }

    #[test]
    fn test_negative_entry_reports_positivity_and_direction() {
        // -5 < 90 so the ordering cannot be long or short either.
        let violations = validate(&input(-5, 90, 120, 1000));
        assert_eq!(
            violations,
            vec![Violation::EntryPriceNotPositive, Violation::InvalidDirection]
        );
    }

    #[test]
    fn test_all_violations_collected() {
        let trade = TradeInput {
            position_size: Some(Decimal::ZERO),
            leverage: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(
            validate(&trade),
            vec![
                Violation::EntryPriceNotPositive,
                Violation::StopLossNotPositive,
                Violation::TakeProfitNotPositive,
                Violation::PositionSizeNotPositive,
                Violation::LeverageBelowOne,
            ]
        );
    }

    #[test]
    fn test_direction_skipped_when_leg_missing() {
        let mut trade = input(100, 100, 120, 1000);
        trade.take_profit = None;
        assert_eq!(validate(&trade), vec![Violation::TakeProfitNotPositive]);
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            Violation::PositionSizeNotPositive.to_string(),
            "Position size must be positive"
        );
        assert!(Violation::InvalidDirection
            .to_string()
            .starts_with("Invalid trade parameters: For long positions"));
        assert_eq!(Violation::LeverageBelowOne.to_string(), "Leverage must be at least 1");
    }
}
