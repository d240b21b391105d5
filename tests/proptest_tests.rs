//! Property-based tests for residual tracking and price conversion.
//!
//! Run with: `cargo test --test proptest_tests`

mod common;

use common::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wareneingang::core::*;
use wareneingang::pricing;
use wareneingang::stock::action_create_picking;

/// Quantity with two decimals (0.01 to 9999.99).
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1u64..1_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Price with two decimals (0.01 to 99999.99).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Currency rate (0.50 to 2.00).
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (50u64..=200u64).prop_map(|r| Decimal::new(r as i64, 2))
}

fn arb_factor() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(1)),
        Just(dec!(1) / dec!(12)),
        Just(dec!(12)),
        Just(dec!(1000)),
        Just(dec!(0.001)),
    ]
}

fn uom(id: u64, factor: Decimal) -> Uom {
    let mut u = Uom::new(format!("U{id}"), "Unit", factor, dec!(0.01));
    u.id = UomId(id);
    u
}

fn currency(id: u64, rate: Decimal) -> Currency {
    let mut c = Currency::new(format!("C{id}")).rate(date(2024, 1, 1), rate);
    c.id = CurrencyId(id);
    c
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Moves cover exactly the invoiced quantity, and re-running adds nothing.
    #[test]
    fn moves_cover_invoiced_quantity_once(qtys in prop::collection::vec(arb_quantity(), 1..=4)) {
        let mut fx = Fixture::new();
        let mut builder = fx.bill();
        for qty in &qtys {
            builder = builder.add_line(fx.screws_line(*qty));
        }
        let bill = fx.create(builder);
        let pickings = fx.approve(&[bill]).unwrap();
        prop_assert_eq!(pickings.len(), 1);

        let before = fx.store.moves().count();
        action_create_picking(&mut fx.store, &fx.ctx, &fx.config, &[bill]).unwrap();
        prop_assert_eq!(fx.store.moves().count(), before);

        for (i, qty) in qtys.iter().enumerate() {
            let line = fx.line_id(bill, i);
            let moved: Decimal = fx
                .store
                .line_moves(line)
                .iter()
                .map(|m| m.product_uom_qty)
                .sum();
            prop_assert_eq!(moved, *qty);
        }
    }

    /// Raising a line quantity in steps never moves more than invoiced.
    #[test]
    fn incremental_runs_add_only_the_difference(
        first in arb_quantity(),
        extra in arb_quantity(),
    ) {
        let mut fx = Fixture::new();
        let line = fx.screws_line(first);
        let bill = fx.create(fx.bill().add_line(line));
        fx.approve(&[bill]).unwrap();

        fx.store.invoice_mut(bill).unwrap().lines[0].quantity = first + extra;
        action_create_picking(&mut fx.store, &fx.ctx, &fx.config, &[bill]).unwrap();

        let qtys: Vec<Decimal> = fx
            .store
            .line_moves(fx.line_id(bill, 0))
            .iter()
            .map(|m| m.product_uom_qty)
            .collect();
        prop_assert_eq!(qtys, vec![first, extra]);
    }

    /// A residual below half the unit's rounding precision creates no move.
    #[test]
    fn sub_precision_residual_creates_no_move(
        qty in arb_quantity(),
        delta in 1u64..50u64,
    ) {
        let mut fx = Fixture::new();
        let line = fx.screws_line(qty);
        let bill = fx.create(fx.bill().add_line(line));
        fx.approve(&[bill]).unwrap();

        // delta / 10000 stays below 0.005
        fx.store.invoice_mut(bill).unwrap().lines[0].quantity = qty + Decimal::new(delta as i64, 4);
        action_create_picking(&mut fx.store, &fx.ctx, &fx.config, &[bill]).unwrap();
        prop_assert_eq!(fx.store.moves().count(), 1);
    }

    /// Unit and currency adjustments commute.
    #[test]
    fn price_adjustments_commute(
        price in arb_price(),
        line_factor in arb_factor(),
        from_rate in arb_rate(),
        to_rate in arb_rate(),
    ) {
        let line_uom = uom(1, line_factor);
        let product_uom = uom(2, dec!(1));
        let from = currency(3, from_rate);
        let to = currency(4, to_rate);
        let on = date(2024, 6, 15);

        let factor = pricing::price_factor(&line_uom, &product_uom).unwrap();
        let uom_first = pricing::convert(price * factor, &from, &to, on).unwrap();
        let currency_first = pricing::convert(price, &from, &to, on).unwrap() * factor;

        prop_assert_eq!(uom_first.round_dp(12), currency_first.round_dp(12));
    }

    /// Tax-excluded price plus tax amounts gives back the included total.
    #[test]
    fn tax_totals_are_consistent(price in arb_price(), included in any::<bool>()) {
        let mut tax = Tax::new("VAT 19%", TaxAmountType::Percent, dec!(19)).price_include(included);
        tax.id = TaxId(1);
        let totals = pricing::compute_all(&[&tax], price, Decimal::ONE).unwrap();
        let taxed: Decimal = totals.taxes.iter().map(|t| t.amount).sum();
        prop_assert_eq!(totals.total_excluded + taxed, totals.total_included);
        if included {
            prop_assert_eq!(totals.total_included, price);
        } else {
            prop_assert_eq!(totals.total_excluded, price);
        }
    }
}
