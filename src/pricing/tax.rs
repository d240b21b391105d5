use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{StockError, Tax, TaxAmountType, TaxId};

/// Result of applying a set of taxes to a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTotals {
    /// Amount without any tax.
    pub total_excluded: Decimal,
    /// Amount with all taxes.
    pub total_included: Decimal,
    pub taxes: Vec<TaxAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAmount {
    pub tax_id: TaxId,
    pub amount: Decimal,
    /// Base the amount was computed on.
    pub base: Decimal,
}

impl Tax {
    /// Tax amount for `base` (already multiplied by `quantity`).
    pub fn compute_amount(&self, base: Decimal, quantity: Decimal) -> Result<Decimal, StockError> {
        let rate = self.amount / dec!(100);
        let amount = match (self.amount_type, self.price_include) {
            (TaxAmountType::Fixed, _) => {
                let qty = if base < Decimal::ZERO {
                    -quantity.abs()
                } else {
                    quantity.abs()
                };
                qty.checked_mul(self.amount)
            }
            (TaxAmountType::Percent, false) | (TaxAmountType::Division, true) => {
                base.checked_mul(rate)
            }
            (TaxAmountType::Percent, true) => Decimal::ONE
                .checked_add(rate)
                .and_then(|divisor| base.checked_div(divisor))
                .and_then(|excluded| base.checked_sub(excluded)),
            (TaxAmountType::Division, false) => Decimal::ONE
                .checked_sub(rate)
                .and_then(|divisor| base.checked_div(divisor))
                .and_then(|gross| gross.checked_sub(base)),
        };
        amount.ok_or_else(|| degenerate(self, base))
    }
}

/// Apply `taxes` in sequence order to `price_unit * quantity`. Amounts are
/// not rounded.
///
/// Price-included taxes are removed from the base as they are applied;
/// taxes flagged `include_base_amount` add their amount to the base of the
/// following taxes.
pub fn compute_all(
    taxes: &[&Tax],
    price_unit: Decimal,
    quantity: Decimal,
) -> Result<TaxTotals, StockError> {
    let mut sorted: Vec<&Tax> = taxes.to_vec();
    sorted.sort_by_key(|t| (t.sequence, t.id));

    let mut base = price_unit
        .checked_mul(quantity)
        .ok_or_else(|| overflow(price_unit, quantity))?;
    let mut total_excluded = base;
    let mut total_included = base;
    let mut amounts = Vec::with_capacity(sorted.len());

    for tax in sorted {
        let amount = tax.compute_amount(base, quantity)?;
        if tax.price_include {
            total_excluded = total_excluded
                .checked_sub(amount)
                .ok_or_else(|| degenerate(tax, base))?;
            base = base.checked_sub(amount).ok_or_else(|| degenerate(tax, base))?;
        } else {
            total_included = total_included
                .checked_add(amount)
                .ok_or_else(|| degenerate(tax, base))?;
        }
        amounts.push(TaxAmount {
            tax_id: tax.id,
            amount,
            base,
        });
        if tax.include_base_amount {
            base = base.checked_add(amount).ok_or_else(|| degenerate(tax, base))?;
        }
    }

    Ok(TaxTotals {
        total_excluded,
        total_included,
        taxes: amounts,
    })
}

fn degenerate(tax: &Tax, base: Decimal) -> StockError {
    StockError::Arithmetic(format!(
        "tax '{}' with amount {} cannot be applied to {base}",
        tax.name, tax.amount
    ))
}

fn overflow(price_unit: Decimal, quantity: Decimal) -> StockError {
    StockError::Arithmetic(format!("price {price_unit} times quantity {quantity} overflows"))
}
