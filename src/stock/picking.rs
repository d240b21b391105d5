use tracing::{debug, info};

use crate::config::StockConfig;
use crate::core::*;
use crate::store::Store;

use super::moves::create_stock_moves;
use super::reconcile::{is_stock_line, residual_quantity};

/// Vendor location goods of `invoice` are received from.
pub fn supplier_location(store: &Store, invoice: &Invoice) -> Result<LocationId, StockError> {
    let partner = store.partner(invoice.partner_id)?;
    partner.supplier_location_id.ok_or_else(|| {
        StockError::User(format!(
            "You must set a Vendor Location for this partner {}",
            partner.name
        ))
    })
}

/// Default destination of the invoice's receipt operation type.
pub fn destination_location(store: &Store, invoice: &Invoice) -> Result<LocationId, StockError> {
    let picking_type_id = invoice.shipping.picking_type_id.ok_or_else(|| {
        StockError::User(format!(
            "invoice '{}' has no receipt operation type",
            invoice.reference()
        ))
    })?;
    let picking_type = store.picking_type(picking_type_id)?;
    picking_type.default_location_dest_id.ok_or_else(|| {
        StockError::Config(format!(
            "operation type '{}' has no default destination location",
            picking_type.name
        ))
    })
}

/// Receipt to create for `invoice`. The name is assigned when it is stored.
pub fn prepare_picking(store: &Store, ctx: &Context, invoice: &Invoice) -> Result<Picking, StockError> {
    let location_id = supplier_location(store, invoice)?;
    let location_dest_id = destination_location(store, invoice)?;
    let picking_type_id = invoice.shipping.picking_type_id.ok_or_else(|| {
        StockError::User(format!(
            "invoice '{}' has no receipt operation type",
            invoice.reference()
        ))
    })?;

    Ok(Picking {
        id: PickingId::default(),
        name: String::new(),
        state: PickingState::Draft,
        picking_type_id,
        partner_id: Some(invoice.partner_id),
        date: invoice.date_invoice.unwrap_or(ctx.today),
        origin: invoice.name.clone().or_else(|| invoice.number.clone()),
        location_id,
        location_dest_id,
        company_id: invoice.company_id,
        source_invoice: Some(invoice.id),
        returned_picking_id: None,
    })
}

/// Note posted on a receipt pointing at its invoice.
pub fn receipt_origin_note(invoice: &Invoice) -> String {
    format!("This receipt has been created from: {}", invoice.reference())
}

/// Create or reuse the open receipt of every invoice and add the residual
/// moves of its lines.
///
/// Re-running it on an invoice with an open receipt reuses that receipt and
/// only adds moves for quantities not yet covered. Invoices whose stock lines
/// are fully covered are skipped. The whole action is rolled back on error.
/// Returns the receipts that received new moves.
pub fn action_create_picking(
    store: &mut Store,
    ctx: &Context,
    config: &StockConfig,
    invoices: &[InvoiceId],
) -> Result<Vec<PickingId>, StockError> {
    store.atomic(|store| create_pickings(store, ctx, config, invoices))
}

pub(crate) fn create_pickings(
    store: &mut Store,
    ctx: &Context,
    config: &StockConfig,
    invoices: &[InvoiceId],
) -> Result<Vec<PickingId>, StockError> {
    let mut touched = Vec::new();

    for &invoice_id in invoices {
        let invoice = store.invoice(invoice_id)?.clone();

        if !has_residual(store, &invoice)? {
            debug!(invoice = %invoice.reference(), "nothing left to receive, skipping receipt");
            continue;
        }

        let open = store
            .invoice_pickings(invoice_id)
            .into_iter()
            .find(|p| p.state.is_open())
            .map(|p| p.id);

        let picking_id = match open {
            Some(id) => id,
            None => {
                let mut picking = prepare_picking(store, ctx, &invoice)?;
                picking.name =
                    store.next_picking_name(picking.picking_type_id, config.picking_name_padding)?;
                let name = picking.name.clone();
                let id = store.add_picking(picking);
                info!(invoice = %invoice.reference(), picking = %name, "receipt created");
                id
            }
        };

        let created = create_stock_moves(store, ctx, &invoice, picking_id)?;
        let mut live = Vec::with_capacity(created.len());
        for id in created {
            let m = store.stock_move(id)?;
            if m.state.is_open() {
                live.push((m.date_expected, id));
            }
        }
        live.sort_by_key(|(date, _)| *date);
        let mut seq: u32 = 0;
        for (_, id) in live {
            seq = seq.saturating_add(config.move_sequence_step);
            store.stock_move_mut(id)?.sequence = seq;
        }

        store.post_message(RecordRef::Picking(picking_id), None, receipt_origin_note(&invoice));
        touched.push(picking_id);
    }

    Ok(touched)
}

/// Whether any stock line of `invoice` still has a quantity to receive.
fn has_residual(store: &Store, invoice: &Invoice) -> Result<bool, StockError> {
    for line in &invoice.lines {
        if is_stock_line(store, line)? && residual_quantity(store, line)?.is_some() {
            return Ok(true);
        }
    }
    Ok(false)
}
