//! In-memory record store with request-level transactions.
//!
//! The store holds the accounting and inventory records the actions operate
//! on. Every public action runs inside [`Store::atomic`]: when the action
//! fails, the store is restored to its state before the action started.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::*;

/// Record tables plus id and number sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    next_id: u64,
    companies: BTreeMap<CompanyId, Company>,
    currencies: BTreeMap<CurrencyId, Currency>,
    uoms: BTreeMap<UomId, Uom>,
    products: BTreeMap<ProductId, Product>,
    taxes: BTreeMap<TaxId, Tax>,
    partners: BTreeMap<PartnerId, Partner>,
    pricelists: BTreeMap<PricelistId, Pricelist>,
    locations: BTreeMap<LocationId, Location>,
    warehouses: BTreeMap<WarehouseId, Warehouse>,
    picking_types: BTreeMap<PickingTypeId, PickingType>,
    pickings: BTreeMap<PickingId, Picking>,
    moves: BTreeMap<MoveId, StockMove>,
    invoices: BTreeMap<InvoiceId, Invoice>,
    messages: BTreeMap<MessageId, Message>,
    invoice_sequences: BTreeMap<String, DocumentSequence>,
    picking_sequences: BTreeMap<PickingTypeId, DocumentSequence>,
}

macro_rules! tables {
    ($($field:ident: $ty:ty, $id:ty, $model:literal => $get:ident, $get_mut:ident, $insert:ident;)*) => {
        impl Store {
            $(
                pub fn $get(&self, id: $id) -> Result<&$ty, StockError> {
                    self.$field
                        .get(&id)
                        .ok_or(StockError::NotFound { model: $model, id: id.0 })
                }

                pub fn $get_mut(&mut self, id: $id) -> Result<&mut $ty, StockError> {
                    self.$field
                        .get_mut(&id)
                        .ok_or(StockError::NotFound { model: $model, id: id.0 })
                }

                /// Store a new record under a fresh id.
                pub fn $insert(&mut self, mut record: $ty) -> $id {
                    let id = <$id>::from(self.allocate_id());
                    record.id = id;
                    self.$field.insert(id, record);
                    id
                }
            )*
        }
    };
}

tables! {
    companies: Company, CompanyId, "res.company" => company, company_mut, add_company;
    currencies: Currency, CurrencyId, "res.currency" => currency, currency_mut, add_currency;
    uoms: Uom, UomId, "product.uom" => uom, uom_mut, add_uom;
    products: Product, ProductId, "product.product" => product, product_mut, add_product;
    taxes: Tax, TaxId, "account.tax" => tax, tax_mut, add_tax;
    partners: Partner, PartnerId, "res.partner" => partner, partner_mut, add_partner;
    pricelists: Pricelist, PricelistId, "product.pricelist" => pricelist, pricelist_mut, add_pricelist;
    locations: Location, LocationId, "stock.location" => location, location_mut, add_location;
    warehouses: Warehouse, WarehouseId, "stock.warehouse" => warehouse, warehouse_mut, add_warehouse;
    picking_types: PickingType, PickingTypeId, "stock.picking.type" => picking_type, picking_type_mut, add_picking_type;
    pickings: Picking, PickingId, "stock.picking" => picking, picking_mut, add_picking;
    moves: StockMove, MoveId, "stock.move" => stock_move, stock_move_mut, add_move;
    invoices: Invoice, InvoiceId, "account.invoice" => invoice, invoice_mut, insert_invoice;
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` as one transaction: on error every change it made is
    /// discarded and the error is returned.
    pub fn atomic<T>(
        &mut self,
        action: impl FnOnce(&mut Store) -> Result<T, StockError>,
    ) -> Result<T, StockError> {
        let snapshot = self.clone();
        match action(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(error = %err, "action failed, rolling back");
                *self = snapshot;
                Err(err)
            }
        }
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Store a new invoice, assigning ids to the invoice and its lines.
    pub fn create_invoice(&mut self, mut invoice: Invoice) -> InvoiceId {
        for line in &mut invoice.lines {
            line.id = InvoiceLineId(self.allocate_id());
        }
        self.insert_invoice(invoice)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn warehouses(&self) -> impl Iterator<Item = &Warehouse> {
        self.warehouses.values()
    }

    pub fn picking_types(&self) -> impl Iterator<Item = &PickingType> {
        self.picking_types.values()
    }

    pub fn invoices(&self) -> impl Iterator<Item = &Invoice> {
        self.invoices.values()
    }

    pub fn pickings(&self) -> impl Iterator<Item = &Picking> {
        self.pickings.values()
    }

    pub fn moves(&self) -> impl Iterator<Item = &StockMove> {
        self.moves.values()
    }

    /// Pickings generated from `invoice` (`picking_ids`), by ascending id.
    pub fn invoice_pickings(&self, invoice: InvoiceId) -> Vec<&Picking> {
        self.pickings
            .values()
            .filter(|p| p.source_invoice == Some(invoice))
            .collect()
    }

    /// Number of pickings generated from `invoice` (`delivery_count`).
    pub fn delivery_count(&self, invoice: InvoiceId) -> usize {
        self.invoice_pickings(invoice).len()
    }

    /// Moves of a picking (`move_lines`), by ascending id.
    pub fn picking_moves(&self, picking: PickingId) -> Vec<&StockMove> {
        self.moves
            .values()
            .filter(|m| m.picking_id == Some(picking))
            .collect()
    }

    /// Moves generated from an invoice line (`move_ids`), by ascending id.
    pub fn line_moves(&self, line: InvoiceLineId) -> Vec<&StockMove> {
        self.moves
            .values()
            .filter(|m| m.invoice_line_id == Some(line))
            .collect()
    }

    /// Usage of the default destination of the invoice's picking type,
    /// used to tell drop-shipping from warehouse receipts.
    pub fn destination_usage(&self, invoice: &Invoice) -> Option<LocationUsage> {
        let picking_type = self.picking_type(invoice.shipping.picking_type_id?).ok()?;
        let location = self.location(picking_type.default_location_dest_id?).ok()?;
        Some(location.usage)
    }

    // ── Chatter ─────────────────────────────────────────────────────────────

    /// Post an internal note on a record.
    pub fn post_message(
        &mut self,
        record: RecordRef,
        subject: Option<String>,
        body: impl Into<String>,
    ) -> MessageId {
        let id = MessageId(self.allocate_id());
        self.messages.insert(
            id,
            Message {
                id,
                record,
                subject,
                body: body.into(),
            },
        );
        id
    }

    /// Messages posted on `record`, oldest first.
    pub fn messages(&self, record: RecordRef) -> Vec<&Message> {
        self.messages
            .values()
            .filter(|m| m.record == record)
            .collect()
    }

    // ── Sequences ───────────────────────────────────────────────────────────

    /// Next invoice number for the invoice type and year of `date`.
    pub fn next_invoice_number(&mut self, invoice_type: InvoiceType, date: NaiveDate) -> String {
        let prefix = match invoice_type {
            InvoiceType::OutInvoice => "INV/",
            InvoiceType::InInvoice => "BILL/",
            InvoiceType::OutRefund => "RINV/",
            InvoiceType::InRefund => "RBILL/",
        };
        let seq = self
            .invoice_sequences
            .entry(prefix.to_string())
            .or_insert_with(|| DocumentSequence::yearly(prefix, date.year()));
        seq.auto_advance(date);
        seq.next_number()
    }

    /// Next picking name from the picking type's sequence.
    pub fn next_picking_name(
        &mut self,
        picking_type: PickingTypeId,
        padding: usize,
    ) -> Result<String, StockError> {
        let prefix = self.picking_type(picking_type)?.sequence_prefix.clone();
        let seq = self
            .picking_sequences
            .entry(picking_type)
            .or_insert_with(|| DocumentSequence::plain(prefix).with_padding(padding));
        Ok(seq.next_number())
    }
}
