use tracing::debug;

use crate::core::*;
use crate::store::Store;

use super::picking::{destination_location, supplier_location};
use super::reconcile::quote_line;

/// Moves to create for one invoice line: at most one, carrying the line's
/// residual quantity.
pub fn prepare_stock_moves(
    store: &Store,
    ctx: &Context,
    invoice: &Invoice,
    line: &InvoiceLine,
    picking: &Picking,
) -> Result<Vec<StockMove>, StockError> {
    let Some(quote) = quote_line(store, ctx, invoice, line)? else {
        debug!(line = %line.name, "nothing left to receive");
        return Ok(Vec::new());
    };
    // quote_line only quotes lines with a product.
    let Some(product_id) = line.product_id else {
        return Ok(Vec::new());
    };

    let product = store.product(product_id)?;
    let date = invoice.date_invoice.unwrap_or(ctx.today);
    let picking_type_id = invoice.shipping.picking_type_id;
    let warehouse = match picking_type_id {
        Some(id) => match store.picking_type(id)?.warehouse_id {
            Some(wh) => Some(store.warehouse(wh)?),
            None => None,
        },
        None => None,
    };

    Ok(vec![StockMove {
        id: MoveId::default(),
        name: line.name.clone(),
        sequence: 10,
        product_id,
        product_uom: line.uom_id.unwrap_or(product.uom_id),
        product_uom_qty: quote.residual,
        date,
        date_expected: date,
        location_id: supplier_location(store, invoice)?,
        location_dest_id: destination_location(store, invoice)?,
        picking_id: Some(picking.id),
        partner_id: Some(invoice.partner_id),
        state: MoveState::Draft,
        invoice_line_id: Some(line.id),
        company_id: invoice.company_id,
        price_unit: quote.price_unit,
        picking_type_id,
        origin: invoice.number.clone(),
        route_ids: warehouse.map(|w| w.route_ids.clone()).unwrap_or_default(),
        warehouse_id: warehouse.map(|w| w.id),
        origin_returned_move_id: None,
    }])
}

/// Create the residual moves of every line of `invoice` in `picking`.
/// Returns the new move ids in line order.
pub fn create_stock_moves(
    store: &mut Store,
    ctx: &Context,
    invoice: &Invoice,
    picking: PickingId,
) -> Result<Vec<MoveId>, StockError> {
    let picking = store.picking(picking)?.clone();
    let mut prepared = Vec::new();
    for line in &invoice.lines {
        prepared.extend(prepare_stock_moves(store, ctx, invoice, line, &picking)?);
    }
    Ok(prepared.into_iter().map(|m| store.add_move(m)).collect())
}
