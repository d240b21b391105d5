use tracing::info;

use crate::config::StockConfig;
use crate::core::*;
use crate::stock::picking::create_pickings;
use crate::store::Store;

/// Move one invoice from draft or pro-forma to open.
///
/// Checks the approval constraints, requires the receipt operation type to
/// be an incoming one, assigns the invoice date (request date when unset)
/// and a number from the yearly sequence of its type.
pub fn open_invoice(store: &mut Store, ctx: &Context, id: InvoiceId) -> Result<(), StockError> {
    let invoice = store.invoice(id)?;
    let mut errors = validate_for_approval(invoice);
    if let Some(pt) = invoice.shipping.picking_type_id {
        let picking_type = store.picking_type(pt)?;
        if picking_type.code != PickingTypeCode::Incoming {
            errors.push(ValidationError::with_constraint(
                "shipping.picking_type_id",
                format!("operation type '{}' is not a receipt type", picking_type.name),
                "incoming_picking_type",
            ));
        }
    }
    if !errors.is_empty() {
        return Err(StockError::from_validation(&errors));
    }

    let date = invoice.date_invoice.unwrap_or(ctx.today);
    let invoice_type = invoice.invoice_type;
    let number = match invoice.number.clone() {
        Some(number) => number,
        None => store.next_invoice_number(invoice_type, date),
    };

    let invoice = store.invoice_mut(id)?;
    invoice.date_invoice = Some(date);
    invoice.date = Some(invoice.date.unwrap_or(date));
    invoice.number = Some(number);
    invoice.state = InvoiceState::Open;
    info!(invoice = %invoice.reference(), "invoice validated");
    Ok(())
}

/// Approve invoices, then generate receipts for the vendor bills among them
/// that carry the stock flag.
///
/// The whole batch is one transaction. Returns the receipts created or
/// reused.
pub fn action_invoice_open(
    store: &mut Store,
    ctx: &Context,
    config: &StockConfig,
    invoices: &[InvoiceId],
) -> Result<Vec<PickingId>, StockError> {
    store.atomic(|store| open_invoices(store, ctx, config, invoices))
}

pub(crate) fn open_invoices(
    store: &mut Store,
    ctx: &Context,
    config: &StockConfig,
    invoices: &[InvoiceId],
) -> Result<Vec<PickingId>, StockError> {
    for &id in invoices {
        open_invoice(store, ctx, id)?;
    }

    let mut to_stock = Vec::new();
    for &id in invoices {
        if store.invoice(id)?.creates_receipts() {
            to_stock.push(id);
        }
    }
    create_pickings(store, ctx, config, &to_stock)
}
