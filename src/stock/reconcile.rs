//! Residual quantity and unit cost of the move generated for an invoice line.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::rounding;
use crate::core::{Context, Invoice, InvoiceLine, MoveState, StockError, Uom};
use crate::pricing;
use crate::store::Store;

/// What a line still has to move, and at which unit cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveQuote {
    /// Quantity in the line's unit not yet covered by a live move.
    pub residual: Decimal,
    /// Unit cost in company currency per product unit.
    pub price_unit: Decimal,
}

/// Quote the move for `line`, or `None` when the line moves nothing: no
/// product, a service product, or no residual quantity.
pub fn quote_line(
    store: &Store,
    ctx: &Context,
    invoice: &Invoice,
    line: &InvoiceLine,
) -> Result<Option<MoveQuote>, StockError> {
    if !is_stock_line(store, line)? {
        return Ok(None);
    }
    let Some(residual) = residual_quantity(store, line)? else {
        return Ok(None);
    };
    let price_unit = stock_move_price_unit(store, ctx, invoice, line)?;
    Ok(Some(MoveQuote {
        residual,
        price_unit,
    }))
}

/// Whether the line's product is tracked in stock.
pub fn is_stock_line(store: &Store, line: &InvoiceLine) -> Result<bool, StockError> {
    match line.product_id {
        Some(product) => Ok(store.product(product)?.product_type.is_stock_tracked()),
        None => Ok(false),
    }
}

/// Unit cost of a move generated from `line`.
///
/// The line price is made tax-excluded (at quantity 1, unrounded), rescaled
/// from the line unit to the product's base unit, and converted from the
/// invoice currency to the company currency at the invoice date's rate.
pub fn stock_move_price_unit(
    store: &Store,
    ctx: &Context,
    invoice: &Invoice,
    line: &InvoiceLine,
) -> Result<Decimal, StockError> {
    let mut price_unit = line.price_unit;

    if !line.tax_ids.is_empty() {
        let taxes = line
            .tax_ids
            .iter()
            .map(|id| store.tax(*id))
            .collect::<Result<Vec<_>, _>>()?;
        price_unit = pricing::compute_all(&taxes, price_unit, Decimal::ONE)?.total_excluded;
    }

    if let Some(product_id) = line.product_id {
        let product = store.product(product_id)?;
        match line.uom_id {
            Some(line_uom) if line_uom != product.uom_id => {
                let factor =
                    pricing::price_factor(store.uom(line_uom)?, store.uom(product.uom_id)?)?;
                price_unit = price_unit.checked_mul(factor).ok_or_else(|| {
                    StockError::Arithmetic(format!(
                        "unit price of line '{}' overflows in the product unit",
                        line.name
                    ))
                })?;
            }
            _ => {}
        }
    }

    let company = store.company(invoice.company_id)?;
    if invoice.currency_id != company.currency_id {
        let date = invoice.date_invoice.unwrap_or(ctx.today);
        price_unit = pricing::convert(
            price_unit,
            store.currency(invoice.currency_id)?,
            store.currency(company.currency_id)?,
            date,
        )?;
    }

    Ok(price_unit)
}

/// Unit the line's quantity is expressed in: its own, else the product's.
pub fn line_uom<'a>(store: &'a Store, line: &InvoiceLine) -> Result<&'a Uom, StockError> {
    if let Some(uom) = line.uom_id {
        return store.uom(uom);
    }
    let product = line.product_id.ok_or_else(|| {
        StockError::User(format!("invoice line '{}' has no product", line.name))
    })?;
    store.uom(store.product(product)?.uom_id)
}

/// Quantity already covered by the line's non-cancelled moves, in the
/// line's unit.
pub fn reserved_quantity(store: &Store, line: &InvoiceLine) -> Result<Decimal, StockError> {
    let uom = line_uom(store, line)?;
    store
        .line_moves(line.id)
        .into_iter()
        .filter(|m| m.state != MoveState::Cancel)
        .try_fold(Decimal::ZERO, |total, m| {
            let qty = pricing::convert_quantity(m.product_uom_qty, store.uom(m.product_uom)?, uom)?;
            total
                .checked_add(qty)
                .ok_or_else(|| overflow(line, "reserved quantity"))
        })
}

/// Invoiced quantity not yet covered by a move, when strictly positive at
/// the rounding precision of the line's unit.
pub fn residual_quantity(store: &Store, line: &InvoiceLine) -> Result<Option<Decimal>, StockError> {
    let uom = line_uom(store, line)?;
    let diff = line
        .quantity
        .checked_sub(reserved_quantity(store, line)?)
        .ok_or_else(|| overflow(line, "residual quantity"))?;
    match rounding::compare(diff, Decimal::ZERO, uom.rounding)? {
        Ordering::Greater => Ok(Some(diff)),
        _ => Ok(None),
    }
}

fn overflow(line: &InvoiceLine, what: &str) -> StockError {
    StockError::Arithmetic(format!("{what} of line '{}' overflows", line.name))
}
