//! Fixed-point scaling of raw collateral amounts.
//!
//! Raw amounts are integers in collateral base units. Scaling sets the decimal
//! exponent instead of dividing, so the result is exact.

use crate::types::{Amount, AmountError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest exponent `Decimal` can carry.
pub const MAX_DECIMALS: u32 = 28;

/// Number of decimals of the collateral token (10^decimals base units per unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralScale(u32);

impl CollateralScale {
    /// USDC-style collateral: 6 decimals.
    pub const USDC: CollateralScale = CollateralScale(6);

    pub fn new(decimals: u32) -> Option<Self> {
        if decimals <= MAX_DECIMALS {
            Some(Self(decimals))
        } else {
            None
        }
    }

    pub fn decimals(&self) -> u32 {
        self.0
    }

    /// scaled(x) = x / 10^decimals
    pub fn scale(&self, amount: Amount) -> Result<Decimal, AmountError> {
        let raw = i128::try_from(amount.value()).map_err(|_| AmountError::OutOfRange(amount))?;
        Decimal::try_from_i128_with_scale(raw, self.0).map_err(|_| AmountError::OutOfRange(amount))
    }
}

impl Default for CollateralScale {
    fn default() -> Self {
        Self::USDC
    }
}

/// Converts a raw amount to an unscaled `Decimal`.
pub fn to_decimal(amount: Amount) -> Result<Decimal, AmountError> {
    CollateralScale(0).scale(amount)
}

/// taker / maker, or zero when nothing was given by the maker.
pub fn price_ratio(maker_amount: Amount, taker_amount: Amount) -> Result<Decimal, AmountError> {
    if maker_amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let maker = to_decimal(maker_amount)?;
    let taker = to_decimal(taker_amount)?;
    taker
        .checked_div(maker)
        .ok_or(AmountError::DecimalOverflow("price"))
}

/// Running average, zero until the first trade.
pub fn average(total: Decimal, count: u64) -> Result<Decimal, AmountError> {
    if count == 0 {
        return Ok(Decimal::ZERO);
    }
    total
        .checked_div(Decimal::from(count))
        .ok_or(AmountError::DecimalOverflow("average trade size"))
}

pub(crate) fn add_scaled(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal, AmountError> {
    lhs.checked_add(rhs).ok_or(AmountError::DecimalOverflow(what))
}
