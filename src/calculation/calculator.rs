use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::{TradeDirection, TradeRequest, TradeResult};

/// Decimal places kept on profit and loss.
pub const PNL_DECIMALS: u32 = 2;
/// Decimal places kept on the risk-reward ratio.
pub const RATIO_DECIMALS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("risk-reward ratio is undefined: stop loss equals entry price")]
    UndefinedRatio,

    #[error("arithmetic overflow while calculating {0}")]
    Overflow(&'static str),
}

/// Compute leveraged profit/loss and the risk-reward ratio for a trade.
///
/// Profit and loss are the relative price move to each leg, scaled by
/// notional size and leverage (no fees, funding or slippage). For a short
/// setup both legs are negated so that profit stays positive and loss
/// negative in either direction; unclassified orderings keep the raw sign.
///
/// Both are rounded half away from zero to 2 dp, the ratio to 4 dp, and
/// the ratio is derived from the unrounded values. A leg smaller than half
/// a cent therefore renders as `0.00` while the ratio stays finite.
pub fn calculate(req: &TradeRequest) -> Result<TradeResult, CalculationError> {
    let prices = [req.entry_price, req.stop_loss, req.take_profit, req.position_size];
    if prices.iter().any(|p| *p <= Decimal::ZERO) {
        return Err(CalculationError::InvalidInput(
            "All prices and position size must be positive",
        ));
    }
    if req.leverage < Decimal::ONE {
        return Err(CalculationError::InvalidInput("Leverage must be at least 1"));
    }

    let mut profit = leg_pnl(req, req.take_profit, "profit")?;
    let mut loss = leg_pnl(req, req.stop_loss, "loss")?;
    if req.direction() == Some(TradeDirection::Short) {
        profit = -profit;
        loss = -loss;
    }

    if loss.is_zero() {
        return Err(CalculationError::UndefinedRatio);
    }
    let ratio = profit
        .checked_div(loss)
        .ok_or(CalculationError::Overflow("risk-reward ratio"))?
        .abs();

    Ok(TradeResult {
        profit: round_to(profit, PNL_DECIMALS),
        loss: round_to(loss, PNL_DECIMALS),
        risk_reward_ratio: round_to(ratio, RATIO_DECIMALS),
        position_size: req.position_size,
        leverage: req.leverage,
        currency_pair: req.currency_pair.clone(),
    })
}

/// `(exit - entry) / entry * size * leverage`
fn leg_pnl(req: &TradeRequest, exit: Decimal, what: &'static str) -> Result<Decimal, CalculationError> {
    (exit - req.entry_price)
        .checked_div(req.entry_price)
        .and_then(|pct| pct.checked_mul(req.position_size))
        .and_then(|v| v.checked_mul(req.leverage))
        .ok_or(CalculationError::Overflow(what))
}

/// Round half away from zero and pin the scale so the value always
/// renders with exactly `dp` decimal places. Zero is never signed.
fn round_to(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
