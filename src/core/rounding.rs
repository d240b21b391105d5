//! Rounding-aware quantity comparison.
//!
//! Quantities are compared after rounding to the precision of their unit of
//! measure (e.g. 0.01), so that `9.999` and `10` are equal for a unit that
//! rounds to cents. Values too large to be expressed in steps of the
//! precision are reported as [`StockError::Arithmetic`].

use std::cmp::Ordering;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::StockError;

/// Round `value` to a multiple of `precision_rounding`, half away from zero.
///
/// A non-positive precision leaves the value untouched.
pub fn round_to(value: Decimal, precision_rounding: Decimal) -> Result<Decimal, StockError> {
    if precision_rounding <= Decimal::ZERO {
        return Ok(value);
    }
    let steps = value
        .checked_div(precision_rounding)
        .ok_or_else(|| overflow(value, precision_rounding))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    steps
        .checked_mul(precision_rounding)
        .ok_or_else(|| overflow(value, precision_rounding))
}

/// Whether `value` rounds to zero at `precision_rounding`.
pub fn is_zero(value: Decimal, precision_rounding: Decimal) -> Result<bool, StockError> {
    Ok(round_to(value, precision_rounding)?.is_zero())
}

/// Compare two quantities at `precision_rounding`.
///
/// Values whose difference rounds to zero compare equal.
pub fn compare(a: Decimal, b: Decimal, precision_rounding: Decimal) -> Result<Ordering, StockError> {
    let delta = a
        .checked_sub(b)
        .ok_or_else(|| StockError::Arithmetic(format!("difference of {a} and {b} overflows")))?;
    Ok(if is_zero(delta, precision_rounding)? {
        Ordering::Equal
    } else if delta < Decimal::ZERO {
        Ordering::Less
    } else {
        Ordering::Greater
    })
}

fn overflow(value: Decimal, precision_rounding: Decimal) -> StockError {
    StockError::Arithmetic(format!(
        "{value} cannot be rounded to a precision of {precision_rounding}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(dec!(2.005), dec!(0.01)).unwrap(), dec!(2.01));
        assert_eq!(round_to(dec!(-2.005), dec!(0.01)).unwrap(), dec!(-2.01));
        assert_eq!(round_to(dec!(7), dec!(5)).unwrap(), dec!(5));
        assert_eq!(round_to(dec!(7.5), dec!(5)).unwrap(), dec!(10));
    }

    #[test]
    fn zero_precision_is_identity() {
        assert_eq!(round_to(dec!(1.23456), Decimal::ZERO).unwrap(), dec!(1.23456));
    }

    #[test]
    fn compare_within_precision() {
        let cmp = |a, b, p| compare(a, b, p).unwrap();
        assert_eq!(cmp(dec!(9.999), dec!(10), dec!(0.01)), Ordering::Equal);
        assert_eq!(cmp(dec!(9.99), dec!(10), dec!(0.01)), Ordering::Less);
        assert_eq!(cmp(dec!(0.004), dec!(0), dec!(0.01)), Ordering::Equal);
        assert_eq!(cmp(dec!(0.005), dec!(0), dec!(0.01)), Ordering::Greater);
        assert_eq!(cmp(dec!(0.4), dec!(0), dec!(1)), Ordering::Equal);
    }

    #[test]
    fn is_zero_uses_unit_precision() {
        assert!(is_zero(dec!(0.0004), dec!(0.001)).unwrap());
        assert!(!is_zero(dec!(0.0005), dec!(0.001)).unwrap());
    }

    #[test]
    fn huge_values_are_errors() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        assert!(matches!(
            round_to(huge, dec!(0.01)),
            Err(StockError::Arithmetic(_))
        ));
        assert!(compare(Decimal::MAX, Decimal::MIN, dec!(1)).is_err());
    }
}
