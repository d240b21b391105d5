use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

macro_rules! id_types {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub u64);

            impl From<u64> for $name {
                fn from(id: u64) -> Self {
                    Self(id)
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

id_types! {
    /// `res.company`
    CompanyId,
    /// `res.users`
    UserId,
    /// `res.currency`
    CurrencyId,
    /// `product.uom`
    UomId,
    /// `product.product`
    ProductId,
    /// `account.tax`
    TaxId,
    /// `res.partner`
    PartnerId,
    /// `product.pricelist`
    PricelistId,
    /// `stock.location`
    LocationId,
    /// `stock.location.route`
    RouteId,
    /// `stock.warehouse`
    WarehouseId,
    /// `stock.picking.type`
    PickingTypeId,
    /// `stock.picking`
    PickingId,
    /// `stock.move`
    MoveId,
    /// `account.invoice`
    InvoiceId,
    /// `account.invoice.line`
    InvoiceLineId,
    /// `mail.message`
    MessageId,
}

// ── Invoices ────────────────────────────────────────────────────────────────

/// Invoice document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceType {
    /// Customer invoice.
    OutInvoice,
    /// Vendor bill.
    InInvoice,
    /// Customer credit note.
    OutRefund,
    /// Vendor credit note.
    InRefund,
}

impl InvoiceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutInvoice => "out_invoice",
            Self::InInvoice => "in_invoice",
            Self::OutRefund => "out_refund",
            Self::InRefund => "in_refund",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "out_invoice" => Some(Self::OutInvoice),
            "in_invoice" => Some(Self::InInvoice),
            "out_refund" => Some(Self::OutRefund),
            "in_refund" => Some(Self::InRefund),
            _ => None,
        }
    }

    /// Type of the credit note generated from a document of this type.
    pub fn refund_type(&self) -> Self {
        match self {
            Self::OutInvoice => Self::OutRefund,
            Self::InInvoice => Self::InRefund,
            Self::OutRefund => Self::OutInvoice,
            Self::InRefund => Self::InInvoice,
        }
    }

    /// Vendor side documents (bills and vendor credit notes).
    pub fn is_vendor(&self) -> bool {
        matches!(self, Self::InInvoice | Self::InRefund)
    }
}

/// Invoice workflow state (owned by the accounting host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceState {
    Draft,
    ProForma,
    ProForma2,
    Open,
    Paid,
    Cancel,
}

impl InvoiceState {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::ProForma => "proforma",
            Self::ProForma2 => "proforma2",
            Self::Open => "open",
            Self::Paid => "paid",
            Self::Cancel => "cancel",
        }
    }

    /// States from which the invoice can still be approved.
    pub fn is_pre_open(&self) -> bool {
        matches!(self, Self::Draft | Self::ProForma | Self::ProForma2)
    }
}

/// Shipping policy of the generated receipts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickingPolicy {
    /// Deliver each product when available.
    #[default]
    Direct,
    /// Deliver all products at once.
    One,
}

impl PickingPolicy {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::One => "one",
        }
    }
}

/// Warehouse and receipt attributes attached to an invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAttributes {
    /// Shipping policy (default: direct).
    pub picking_policy: PickingPolicy,
    /// Incoming picking type used for generated receipts ("Deliver To").
    pub picking_type_id: Option<PickingTypeId>,
    /// Receiving warehouse.
    pub warehouse_id: Option<WarehouseId>,
    /// Pricelist of the invoice.
    pub pricelist_id: Option<PricelistId>,
    /// Whether approving the invoice creates receipts.
    pub create_stock: bool,
}

/// Invoice (`account.invoice`) with the shipping extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Number assigned on approval.
    pub number: Option<String>,
    /// Vendor reference or refund description.
    pub name: Option<String>,
    pub invoice_type: InvoiceType,
    pub state: InvoiceState,
    pub partner_id: PartnerId,
    pub company_id: CompanyId,
    pub currency_id: CurrencyId,
    /// Invoice date.
    pub date_invoice: Option<NaiveDate>,
    /// Accounting date.
    pub date: Option<NaiveDate>,
    /// Source document reference.
    pub origin: Option<String>,
    /// Whether the receivable/payable entries are fully reconciled.
    pub reconciled: bool,
    /// Source invoice of a credit note.
    pub refund_invoice_id: Option<InvoiceId>,
    pub lines: Vec<InvoiceLine>,
    pub shipping: ShippingAttributes,
}

impl Invoice {
    /// Reference shown on receipts and chatter: number, then name.
    pub fn reference(&self) -> &str {
        self.number
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Vendor bills with the stock flag set generate receipts on approval.
    pub fn creates_receipts(&self) -> bool {
        self.shipping.create_stock && self.invoice_type == InvoiceType::InInvoice
    }

    pub fn line(&self, id: InvoiceLineId) -> Option<&InvoiceLine> {
        self.lines.iter().find(|l| l.id == id)
    }
}

/// Invoice line (`account.invoice.line`).
///
/// The generated stock moves point back at the line through
/// [`StockMove::invoice_line_id`]; see [`Store::line_moves`](crate::store::Store::line_moves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: InvoiceLineId,
    /// Line label.
    pub name: String,
    pub product_id: Option<ProductId>,
    /// Unit of the invoiced quantity (defaults to the product unit).
    pub uom_id: Option<UomId>,
    pub quantity: Decimal,
    pub price_unit: Decimal,
    pub tax_ids: Vec<TaxId>,
}

// ── Stock ───────────────────────────────────────────────────────────────────

/// Picking (transfer) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickingState {
    Draft,
    Waiting,
    Confirmed,
    Assigned,
    Done,
    Cancel,
}

impl PickingState {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Waiting => "waiting",
            Self::Confirmed => "confirmed",
            Self::Assigned => "assigned",
            Self::Done => "done",
            Self::Cancel => "cancel",
        }
    }

    /// Neither done nor cancelled.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Done | Self::Cancel)
    }
}

/// Stock move state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveState {
    Draft,
    Waiting,
    Confirmed,
    Assigned,
    Done,
    Cancel,
}

impl MoveState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Done | Self::Cancel)
    }
}

/// Operation kind of a picking type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickingTypeCode {
    Incoming,
    Outgoing,
    Internal,
}

/// Purpose of a stock location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationUsage {
    Supplier,
    View,
    Internal,
    Customer,
    Inventory,
    Procurement,
    Production,
    Transit,
}

/// Receipt or return document (`stock.picking`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picking {
    pub id: PickingId,
    pub name: String,
    pub state: PickingState,
    pub picking_type_id: PickingTypeId,
    pub partner_id: Option<PartnerId>,
    pub date: NaiveDate,
    pub origin: Option<String>,
    pub location_id: LocationId,
    pub location_dest_id: LocationId,
    pub company_id: CompanyId,
    /// Invoice that generated this receipt.
    pub source_invoice: Option<InvoiceId>,
    /// Receipt reversed by this return.
    pub returned_picking_id: Option<PickingId>,
}

/// Single product movement between two locations (`stock.move`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMove {
    pub id: MoveId,
    pub name: String,
    pub sequence: u32,
    pub product_id: ProductId,
    /// Unit of `product_uom_qty`.
    pub product_uom: UomId,
    pub product_uom_qty: Decimal,
    pub date: NaiveDate,
    pub date_expected: NaiveDate,
    pub location_id: LocationId,
    pub location_dest_id: LocationId,
    pub picking_id: Option<PickingId>,
    pub partner_id: Option<PartnerId>,
    pub state: MoveState,
    /// Invoice line that spawned this move.
    pub invoice_line_id: Option<InvoiceLineId>,
    pub company_id: CompanyId,
    /// Unit cost in company currency per product unit.
    pub price_unit: Decimal,
    pub picking_type_id: Option<PickingTypeId>,
    pub origin: Option<String>,
    pub route_ids: Vec<RouteId>,
    pub warehouse_id: Option<WarehouseId>,
    /// Move reversed by this (return) move.
    pub origin_returned_move_id: Option<MoveId>,
}

/// Operation type (`stock.picking.type`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickingType {
    pub id: PickingTypeId,
    /// Display name, e.g. "Receipts".
    pub name: String,
    pub code: PickingTypeCode,
    pub warehouse_id: Option<WarehouseId>,
    pub default_location_src_id: Option<LocationId>,
    pub default_location_dest_id: Option<LocationId>,
    /// Prefix of generated picking names, e.g. "WH/IN/".
    pub sequence_prefix: String,
    /// Operation type used when returning pickings of this type.
    pub return_picking_type_id: Option<PickingTypeId>,
}

impl PickingType {
    pub fn new(
        name: impl Into<String>,
        code: PickingTypeCode,
        sequence_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id: PickingTypeId::default(),
            name: name.into(),
            code,
            warehouse_id: None,
            default_location_src_id: None,
            default_location_dest_id: None,
            sequence_prefix: sequence_prefix.into(),
            return_picking_type_id: None,
        }
    }

    pub fn warehouse(mut self, id: WarehouseId) -> Self {
        self.warehouse_id = Some(id);
        self
    }

    pub fn default_source(mut self, id: LocationId) -> Self {
        self.default_location_src_id = Some(id);
        self
    }

    pub fn default_destination(mut self, id: LocationId) -> Self {
        self.default_location_dest_id = Some(id);
        self
    }

    pub fn return_type(mut self, id: PickingTypeId) -> Self {
        self.return_picking_type_id = Some(id);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub usage: LocationUsage,
}

impl Location {
    pub fn new(name: impl Into<String>, usage: LocationUsage) -> Self {
        Self {
            id: LocationId::default(),
            name: name.into(),
            usage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    /// Short code, e.g. "WH".
    pub code: String,
    pub company_id: CompanyId,
    pub route_ids: Vec<RouteId>,
}

impl Warehouse {
    pub fn new(name: impl Into<String>, code: impl Into<String>, company_id: CompanyId) -> Self {
        Self {
            id: WarehouseId::default(),
            name: name.into(),
            code: code.into(),
            company_id,
            route_ids: Vec::new(),
        }
    }

    pub fn route(mut self, id: RouteId) -> Self {
        self.route_ids.push(id);
        self
    }
}

// ── Products, units, taxes, currencies ──────────────────────────────────────

/// Product type; only storable and consumable products are moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    /// Stockable product ("product").
    Product,
    /// Consumable ("consu").
    Consumable,
    /// Service.
    Service,
}

impl ProductType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Consumable => "consu",
            Self::Service => "service",
        }
    }

    /// Physical goods tracked by the warehouse.
    pub fn is_stock_tracked(&self) -> bool {
        matches!(self, Self::Product | Self::Consumable)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub product_type: ProductType,
    /// Base unit of measure.
    pub uom_id: UomId,
}

impl Product {
    pub fn new(name: impl Into<String>, product_type: ProductType, uom_id: UomId) -> Self {
        Self {
            id: ProductId::default(),
            name: name.into(),
            product_type,
            uom_id,
        }
    }
}

/// Unit of measure.
///
/// `factor` is the number of this unit in one reference unit of the
/// category (a dozen has factor 1/12 when the reference is "Unit").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uom {
    pub id: UomId,
    pub name: String,
    pub category: String,
    pub factor: Decimal,
    /// Rounding precision, e.g. 0.01.
    pub rounding: Decimal,
}

impl Uom {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        factor: Decimal,
        rounding: Decimal,
    ) -> Self {
        Self {
            id: UomId::default(),
            name: name.into(),
            category: category.into(),
            factor,
            rounding,
        }
    }
}

/// How a tax amount is derived from its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxAmountType {
    /// Fixed amount per unit.
    Fixed,
    /// Percentage of the price.
    Percent,
    /// Percentage of the price tax included.
    Division,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tax {
    pub id: TaxId,
    pub name: String,
    pub sequence: u32,
    pub amount_type: TaxAmountType,
    pub amount: Decimal,
    /// Price on the line already includes this tax.
    pub price_include: bool,
    /// Subsequent taxes use base + this tax.
    pub include_base_amount: bool,
}

impl Tax {
    pub fn new(name: impl Into<String>, amount_type: TaxAmountType, amount: Decimal) -> Self {
        Self {
            id: TaxId::default(),
            name: name.into(),
            sequence: 1,
            amount_type,
            amount,
            price_include: false,
            include_base_amount: false,
        }
    }

    pub fn price_include(mut self, included: bool) -> Self {
        self.price_include = included;
        self
    }

    pub fn include_base_amount(mut self, include: bool) -> Self {
        self.include_base_amount = include;
        self
    }

    pub fn sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }
}

/// Rate of a currency against the company base currency, valid from `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub date: NaiveDate,
    /// Units of this currency per one unit of the base currency.
    pub rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    /// ISO 4217 code.
    pub code: String,
    /// Sorted ascending by date.
    pub rates: Vec<CurrencyRate>,
}

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            id: CurrencyId::default(),
            code: code.into(),
            rates: Vec::new(),
        }
    }

    pub fn rate(mut self, date: NaiveDate, rate: Decimal) -> Self {
        let pos = self.rates.partition_point(|r| r.date <= date);
        self.rates.insert(pos, CurrencyRate { date, rate });
        self
    }
}

// ── Parties ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub currency_id: CurrencyId,
}

impl Company {
    pub fn new(name: impl Into<String>, currency_id: CurrencyId) -> Self {
        Self {
            id: CompanyId::default(),
            name: name.into(),
            currency_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    /// Source location of goods received from this vendor.
    pub supplier_location_id: Option<LocationId>,
    /// Default pricelist.
    pub pricelist_id: Option<PricelistId>,
}

impl Partner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PartnerId::default(),
            name: name.into(),
            supplier_location_id: None,
            pricelist_id: None,
        }
    }

    pub fn supplier_location(mut self, id: LocationId) -> Self {
        self.supplier_location_id = Some(id);
        self
    }

    pub fn pricelist(mut self, id: PricelistId) -> Self {
        self.pricelist_id = Some(id);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pricelist {
    pub id: PricelistId,
    pub name: String,
    pub currency_id: CurrencyId,
}

impl Pricelist {
    pub fn new(name: impl Into<String>, currency_id: CurrencyId) -> Self {
        Self {
            id: PricelistId::default(),
            name: name.into(),
            currency_id,
        }
    }
}

// ── Chatter ─────────────────────────────────────────────────────────────────

/// Record a chatter message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordRef {
    Invoice(InvoiceId),
    Picking(PickingId),
}

/// Internal note posted on a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub record: RecordRef,
    pub subject: Option<String>,
    pub body: String,
}
