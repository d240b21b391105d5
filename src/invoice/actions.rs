use serde::{Deserialize, Serialize};

use crate::core::*;
use crate::store::Store;

/// What to show for "view linked deliveries".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryAction {
    /// No linked receipt: the unfiltered transfer list.
    All,
    /// Exactly one receipt: its form.
    Form(PickingId),
    /// Several receipts: a list restricted to them.
    List(Vec<PickingId>),
}

/// Receipts linked to `invoices`, as a form for one or a list for several.
pub fn action_view_delivery(
    store: &Store,
    invoices: &[InvoiceId],
) -> Result<DeliveryAction, StockError> {
    let mut pickings = Vec::new();
    for &id in invoices {
        store.invoice(id)?;
        pickings.extend(store.invoice_pickings(id).into_iter().map(|p| p.id));
    }
    pickings.sort();
    pickings.dedup();

    Ok(match pickings.as_slice() {
        [] => DeliveryAction::All,
        [single] => DeliveryAction::Form(*single),
        _ => DeliveryAction::List(pickings),
    })
}

/// First warehouse of the request's company.
pub fn default_warehouse(store: &Store, ctx: &Context) -> Option<WarehouseId> {
    store
        .warehouses()
        .find(|w| w.company_id == ctx.company_id)
        .map(|w| w.id)
}

/// First incoming operation type.
pub fn default_picking_type(store: &Store) -> Option<PickingTypeId> {
    store
        .picking_types()
        .find(|pt| pt.code == PickingTypeCode::Incoming)
        .map(|pt| pt.id)
}

/// Shipping attributes of a new invoice.
pub fn default_shipping(store: &Store, ctx: &Context) -> ShippingAttributes {
    ShippingAttributes {
        warehouse_id: default_warehouse(store, ctx),
        picking_type_id: default_picking_type(store),
        ..ShippingAttributes::default()
    }
}

/// The invoice's company follows the company of its warehouse.
pub fn onchange_warehouse(store: &Store, invoice: &mut Invoice) -> Result<(), StockError> {
    if let Some(wh) = invoice.shipping.warehouse_id {
        invoice.company_id = store.warehouse(wh)?.company_id;
    }
    Ok(())
}

/// The invoice's pricelist follows the partner's default pricelist.
pub fn onchange_partner_pricelist(store: &Store, invoice: &mut Invoice) -> Result<(), StockError> {
    invoice.shipping.pricelist_id = store.partner(invoice.partner_id)?.pricelist_id;
    Ok(())
}
