//! Trade calculation engine: a pure validation predicate and a pure
//! profit/loss calculator. Neither holds state or performs I/O.

pub mod calculator;
pub mod validator;

pub use calculator::{calculate, CalculationError};
pub use validator::{validate, Violation};
