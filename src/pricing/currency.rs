use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{Currency, StockError};

impl Currency {
    /// Rate in effect on `date`: the latest rate dated on or before it.
    /// A currency without applicable rate counts as 1.
    pub fn rate_at(&self, date: NaiveDate) -> Decimal {
        let pos = self.rates.partition_point(|r| r.date <= date);
        match pos {
            0 => Decimal::ONE,
            n => self.rates[n - 1].rate,
        }
    }
}

/// Convert `amount` from one currency into another at the rates in effect on
/// `date`. No rounding is applied.
pub fn convert(
    amount: Decimal,
    from: &Currency,
    to: &Currency,
    date: NaiveDate,
) -> Result<Decimal, StockError> {
    if from.id == to.id {
        return Ok(amount);
    }
    let from_rate = from.rate_at(date);
    let to_rate = to.rate_at(date);
    amount
        .checked_mul(to_rate)
        .and_then(|scaled| scaled.checked_div(from_rate))
        .ok_or_else(|| {
            StockError::Arithmetic(format!(
                "{amount} cannot be converted from {} to {} on {date}",
                from.code, to.code
            ))
        })
}
