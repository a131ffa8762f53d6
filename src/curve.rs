//! Step bonding curve.
//!
//! The price of a unit only depends on how many units are outstanding: every
//! `scaling_factor` units sold raise the price by one more `base_price`.
use crate::error::IcoError;

/// Price of the next unit once `units_sold` units are outstanding
pub fn unit_price(units_sold: u64, base_price: u64, scaling_factor: u64) -> Result<u64, IcoError> {
    let tier = units_sold
        .checked_div(scaling_factor)
        .ok_or(IcoError::CalculationOverflow)?;
    if tier == 0 {
        return Ok(base_price);
    }
    tier.checked_add(1)
        .and_then(|t| base_price.checked_mul(t))
        .ok_or(IcoError::CalculationOverflow)
}

/// Whole units `lamports` pay for at `price`, the remainder is not refunded
pub fn units_for_lamports(lamports: u64, price: u64) -> Result<u64, IcoError> {
    lamports
        .checked_div(price)
        .ok_or(IcoError::CalculationOverflow)
}

pub fn lamports_for_units(units: u64, price: u64) -> Result<u64, IcoError> {
    units
        .checked_mul(price)
        .ok_or(IcoError::CalculationOverflow)
}

#[derive(Debug, PartialEq, Eq)]
pub struct BuyQuote {
    pub unit_price: u64,
    pub units: u64,
}

/// Quotes a purchase at the pre-purchase tier
pub fn quote_buy(
    units_sold: u64,
    base_price: u64,
    scaling_factor: u64,
    lamports_in: u64,
) -> Result<BuyQuote, IcoError> {
    let unit_price = unit_price(units_sold, base_price, scaling_factor)?;
    let units = units_for_lamports(lamports_in, unit_price)?;
    Ok(BuyQuote { unit_price, units })
}

#[derive(Debug, PartialEq, Eq)]
pub struct SellQuote {
    pub unit_price: u64,
    pub lamports: u64,
}

/// Quotes a sale at the tier reached once the sold units are gone
pub fn quote_sell(
    units_sold: u64,
    base_price: u64,
    scaling_factor: u64,
    units_in: u64,
) -> Result<SellQuote, IcoError> {
    let remaining = units_sold
        .checked_sub(units_in)
        .ok_or(IcoError::CalculationOverflow)?;
    let unit_price = unit_price(remaining, base_price, scaling_factor)?;
    let lamports = lamports_for_units(units_in, unit_price)?;
    Ok(SellQuote {
        unit_price,
        lamports,
    })
}
