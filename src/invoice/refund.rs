use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ReceiptTypeMap, StockConfig};
use crate::core::*;
use crate::stock::{cancel_picking, create_return};
use crate::store::Store;

use super::approval::open_invoices;

/// How the credit note is applied to the source invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundMode {
    /// Create a draft credit note.
    #[default]
    Refund,
    /// Create, validate and reconcile a credit note with the invoice.
    Cancel,
    /// As `Cancel`, then create a new draft copy of the invoice.
    Modify,
}

impl RefundMode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Refund => "refund",
            Self::Cancel => "cancel",
            Self::Modify => "modify",
        }
    }

    fn reconciles(&self) -> bool {
        matches!(self, Self::Cancel | Self::Modify)
    }
}

/// Parameters of the refund wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    pub mode: RefundMode,
    /// Credit note date.
    pub date_invoice: Option<NaiveDate>,
    /// Accounting date.
    pub date: Option<NaiveDate>,
    /// Reason; defaults to the source invoice's name.
    pub description: Option<String>,
}

impl RefundRequest {
    pub fn new(mode: RefundMode, date_invoice: NaiveDate) -> Self {
        Self {
            mode,
            date_invoice: Some(date_invoice),
            date: None,
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn accounting_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Invoice list the created documents are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceFamily {
    /// Customer invoices and credit notes.
    Customer,
    /// Vendor bills and credit notes.
    Vendor,
}

/// Documents produced by [`compute_refund`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundOutcome {
    /// Credit notes and, in modify mode, the new draft invoices, in creation order.
    pub created: Vec<InvoiceId>,
    /// Returns of done receipts.
    pub returns: Vec<PickingId>,
    /// Receipts cancelled because they were not done yet.
    pub cancelled: Vec<PickingId>,
    /// List to display `created` in.
    pub family: Option<InvoiceFamily>,
}

/// Refund invoices, reversing their receipts and mirroring their warehouse
/// attributes onto the credit notes.
///
/// For invoices with the stock flag, done receipts are returned and open
/// ones cancelled before the credit note is created. The credit note gets
/// the invoice's stock flag, warehouse, shipping policy and the receipt
/// operation type resolved for the warehouse by `receipt_types`. Everything
/// is rolled back if any invoice cannot be refunded.
pub fn compute_refund(
    store: &mut Store,
    ctx: &Context,
    config: &StockConfig,
    receipt_types: &ReceiptTypeMap,
    invoices: &[InvoiceId],
    request: &RefundRequest,
) -> Result<RefundOutcome, StockError> {
    store.atomic(|store| refund_invoices(store, ctx, config, receipt_types, invoices, request))
}

fn refund_invoices(
    store: &mut Store,
    ctx: &Context,
    config: &StockConfig,
    receipt_types: &ReceiptTypeMap,
    invoices: &[InvoiceId],
    request: &RefundRequest,
) -> Result<RefundOutcome, StockError> {
    let date_invoice = request.date_invoice.ok_or_else(|| {
        StockError::User("You must set a date for the credit note".into())
    })?;
    let mut outcome = RefundOutcome::default();

    for &id in invoices {
        let source = store.invoice(id)?.clone();
        check_refundable(&source, request.mode)?;

        if source.shipping.create_stock {
            reverse_receipts(store, ctx, config, &source, &mut outcome)?;
        }

        let description = request
            .description
            .clone()
            .or_else(|| source.name.clone())
            .unwrap_or_default();
        // Credit notes that receive stock or get approved need a receipt type.
        let picking_type_id = match source.shipping.warehouse_id {
            Some(wh) if source.shipping.create_stock || request.mode.reconciles() => {
                Some(receipt_types.require(wh)?)
            }
            Some(wh) => receipt_types.get(wh),
            None => None,
        };
        let shipping = ShippingAttributes {
            picking_policy: source.shipping.picking_policy,
            picking_type_id,
            warehouse_id: source.shipping.warehouse_id,
            pricelist_id: source.shipping.pricelist_id,
            create_stock: source.shipping.create_stock,
        };

        let refund_id = store.create_invoice(Invoice {
            id: InvoiceId::default(),
            number: None,
            name: Some(description.clone()),
            invoice_type: source.invoice_type.refund_type(),
            state: InvoiceState::Draft,
            partner_id: source.partner_id,
            company_id: source.company_id,
            currency_id: source.currency_id,
            date_invoice: Some(date_invoice),
            date: request.date,
            origin: source.number.clone(),
            reconciled: false,
            refund_invoice_id: Some(source.id),
            lines: source.lines.clone(),
            shipping: shipping.clone(),
        });
        outcome.created.push(refund_id);
        info!(invoice = %source.reference(), mode = request.mode.code(), "credit note created");

        if request.mode.reconciles() {
            store.invoice_mut(id)?.reconciled = false;
            open_invoices(store, ctx, config, &[refund_id])?;
            for doc in [id, refund_id] {
                let inv = store.invoice_mut(doc)?;
                inv.reconciled = true;
                inv.state = InvoiceState::Paid;
            }

            if request.mode == RefundMode::Modify {
                let copy = store.create_invoice(Invoice {
                    id: InvoiceId::default(),
                    number: None,
                    name: source.name.clone(),
                    invoice_type: source.invoice_type,
                    state: InvoiceState::Draft,
                    partner_id: source.partner_id,
                    company_id: source.company_id,
                    currency_id: source.currency_id,
                    date_invoice: Some(date_invoice),
                    date: request.date,
                    origin: source.origin.clone(),
                    reconciled: false,
                    refund_invoice_id: None,
                    lines: source.lines.clone(),
                    shipping,
                });
                outcome.created.push(copy);
            }
        }

        outcome.family = Some(if source.invoice_type.is_vendor() {
            InvoiceFamily::Vendor
        } else {
            InvoiceFamily::Customer
        });
        store.post_message(
            RecordRef::Invoice(refund_id),
            Some("Invoice refund".into()),
            description,
        );
    }

    Ok(outcome)
}

/// Preconditions of the accounting host's refund wizard.
pub fn check_refundable(invoice: &Invoice, mode: RefundMode) -> Result<(), StockError> {
    if matches!(
        invoice.state,
        InvoiceState::Draft | InvoiceState::ProForma | InvoiceState::ProForma2 | InvoiceState::Cancel
    ) {
        return Err(StockError::State(
            "Cannot refund draft/proforma/cancelled invoice.".into(),
        ));
    }
    if invoice.reconciled && mode.reconciles() {
        return Err(StockError::State(
            "Cannot refund invoice which is already reconciled, invoice should be unreconciled first. You can only refund this invoice.".into(),
        ));
    }
    Ok(())
}

/// Return the done receipts of `invoice` and cancel the open ones.
fn reverse_receipts(
    store: &mut Store,
    ctx: &Context,
    config: &StockConfig,
    invoice: &Invoice,
    outcome: &mut RefundOutcome,
) -> Result<(), StockError> {
    let receipts: Vec<(PickingId, PickingState)> = store
        .invoice_pickings(invoice.id)
        .into_iter()
        .map(|p| (p.id, p.state))
        .collect();

    for (picking, state) in receipts {
        match state {
            PickingState::Done => outcome.returns.push(create_return(store, ctx, config, picking)?),
            PickingState::Cancel => {}
            _ => {
                cancel_picking(store, picking)?;
                outcome.cancelled.push(picking);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice(state: InvoiceState, reconciled: bool) -> Invoice {
        let mut inv = InvoiceBuilder::vendor_bill(PartnerId(1), CompanyId(1), CurrencyId(1))
            .add_line(InvoiceLineBuilder::new("Bolts", dec!(1), dec!(1)).build())
            .build_unchecked();
        inv.state = state;
        inv.reconciled = reconciled;
        inv
    }

    #[test]
    fn draft_and_cancelled_are_not_refundable() {
        for state in [
            InvoiceState::Draft,
            InvoiceState::ProForma,
            InvoiceState::ProForma2,
            InvoiceState::Cancel,
        ] {
            assert!(matches!(
                check_refundable(&invoice(state, false), RefundMode::Refund),
                Err(StockError::State(_))
            ));
        }
    }

    #[test]
    fn reconciled_only_allows_plain_refund() {
        let inv = invoice(InvoiceState::Paid, true);
        assert!(check_refundable(&inv, RefundMode::Refund).is_ok());
        assert!(check_refundable(&inv, RefundMode::Cancel).is_err());
        assert!(check_refundable(&inv, RefundMode::Modify).is_err());
    }

    #[test]
    fn open_invoice_is_refundable_in_every_mode() {
        let inv = invoice(InvoiceState::Open, false);
        for mode in [RefundMode::Refund, RefundMode::Cancel, RefundMode::Modify] {
            assert!(check_refundable(&inv, mode).is_ok());
        }
    }
}
