use rust_decimal::Decimal;

use crate::core::{StockError, Uom};

/// Convert `qty` expressed in `from` into `to`. Both units must belong to the
/// same category. No rounding is applied.
pub fn convert_quantity(qty: Decimal, from: &Uom, to: &Uom) -> Result<Decimal, StockError> {
    if from.id == to.id {
        return Ok(qty);
    }
    check_category(from, to)?;
    qty.checked_div(from.factor)
        .and_then(|reference| reference.checked_mul(to.factor))
        .ok_or_else(|| {
            StockError::Arithmetic(format!(
                "{qty} cannot be converted from unit '{}' to '{}'",
                from.name, to.name
            ))
        })
}

/// Factor that rescales a price per `line_uom` into a price per `product_uom`.
///
/// A dozen (factor 1/12) priced at 12.00 is 1.00 per unit (factor 1).
pub fn price_factor(line_uom: &Uom, product_uom: &Uom) -> Result<Decimal, StockError> {
    check_category(line_uom, product_uom)?;
    line_uom
        .factor
        .checked_div(product_uom.factor)
        .ok_or_else(|| zero_factor(product_uom))
}

fn check_category(from: &Uom, to: &Uom) -> Result<(), StockError> {
    if from.category != to.category {
        return Err(StockError::Arithmetic(format!(
            "cannot convert between unit '{}' ({}) and '{}' ({})",
            from.name, from.category, to.name, to.category
        )));
    }
    Ok(())
}

fn zero_factor(uom: &Uom) -> StockError {
    StockError::Arithmetic(format!("unit '{}' has a zero conversion factor", uom.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UomId;
    use rust_decimal_macros::dec;

    fn uom(id: u64, name: &str, category: &str, factor: Decimal) -> Uom {
        let mut u = Uom::new(name, category, factor, dec!(0.01));
        u.id = UomId(id);
        u
    }

    #[test]
    fn dozen_to_units() {
        let unit = uom(1, "Unit", "Unit", dec!(1));
        let dozen = uom(2, "Dozen", "Unit", dec!(1) / dec!(12));
        let qty = convert_quantity(dec!(2), &dozen, &unit).unwrap();
        assert_eq!(qty.round_dp(10), dec!(24));
    }

    #[test]
    fn price_per_dozen_to_price_per_unit() {
        let unit = uom(1, "Unit", "Unit", dec!(1));
        let dozen = uom(2, "Dozen", "Unit", dec!(1) / dec!(12));
        let factor = price_factor(&dozen, &unit).unwrap();
        assert_eq!((dec!(12) * factor).round_dp(10), dec!(1));
    }

    #[test]
    fn category_mismatch() {
        let unit = uom(1, "Unit", "Unit", dec!(1));
        let kg = uom(2, "kg", "Weight", dec!(1));
        assert!(matches!(
            convert_quantity(dec!(1), &unit, &kg),
            Err(StockError::Arithmetic(_))
        ));
    }

    #[test]
    fn zero_factor_rejected() {
        let unit = uom(1, "Unit", "Unit", dec!(1));
        let broken = uom(2, "Broken", "Unit", Decimal::ZERO);
        assert!(convert_quantity(dec!(1), &broken, &unit).is_err());
        assert!(price_factor(&unit, &broken).is_err());
    }
}
