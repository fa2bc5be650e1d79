use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::constants::PERCENT_DECIMALS;
use crate::errors::{Result, ValidationError};

const ONE_HUNDRED: Decimal = dec!(100);

/// Computes `numerator / denominator * 100`, rounded half-up at
/// [`PERCENT_DECIMALS`] places.
///
/// A zero denominator is an error; it is never coerced to 0 or 100.
pub fn percentage(numerator: Decimal, denominator: Decimal) -> Result<Decimal> {
    if denominator.is_zero() {
        return Err(ValidationError::DivisionByZero.into());
    }
    Ok((numerator / denominator * ONE_HUNDRED)
        .round_dp_with_strategy(PERCENT_DECIMALS, RoundingStrategy::MidpointAwayFromZero))
}
