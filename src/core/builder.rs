use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::StockError;
use super::types::*;
use super::validation;

/// Builder for constructing invoices before they are stored.
///
/// Ids of the invoice and its lines are assigned by
/// [`Store::create_invoice`](crate::store::Store::create_invoice).
///
/// ```
/// use wareneingang::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::vendor_bill(PartnerId(7), CompanyId(1), CurrencyId(1))
///     .date_invoice(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
///     .warehouse(WarehouseId(1))
///     .picking_type(PickingTypeId(1))
///     .create_stock(true)
///     .add_line(InvoiceLineBuilder::new("Screws M4", dec!(100), dec!(0.12))
///         .product(ProductId(3))
///         .build())
///     .build()
///     .unwrap();
///
/// assert!(invoice.creates_receipts());
/// ```
pub struct InvoiceBuilder {
    invoice_type: InvoiceType,
    partner_id: PartnerId,
    company_id: CompanyId,
    currency_id: CurrencyId,
    name: Option<String>,
    date_invoice: Option<NaiveDate>,
    date: Option<NaiveDate>,
    origin: Option<String>,
    lines: Vec<InvoiceLine>,
    shipping: ShippingAttributes,
}

impl InvoiceBuilder {
    pub fn new(
        invoice_type: InvoiceType,
        partner_id: PartnerId,
        company_id: CompanyId,
        currency_id: CurrencyId,
    ) -> Self {
        Self {
            invoice_type,
            partner_id,
            company_id,
            currency_id,
            name: None,
            date_invoice: None,
            date: None,
            origin: None,
            lines: Vec::new(),
            shipping: ShippingAttributes::default(),
        }
    }

    pub fn vendor_bill(partner_id: PartnerId, company_id: CompanyId, currency_id: CurrencyId) -> Self {
        Self::new(InvoiceType::InInvoice, partner_id, company_id, currency_id)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn date_invoice(mut self, date: NaiveDate) -> Self {
        self.date_invoice = Some(date);
        self
    }

    pub fn accounting_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn warehouse(mut self, id: WarehouseId) -> Self {
        self.shipping.warehouse_id = Some(id);
        self
    }

    pub fn picking_type(mut self, id: PickingTypeId) -> Self {
        self.shipping.picking_type_id = Some(id);
        self
    }

    pub fn picking_policy(mut self, policy: PickingPolicy) -> Self {
        self.shipping.picking_policy = policy;
        self
    }

    pub fn pricelist(mut self, id: PricelistId) -> Self {
        self.shipping.pricelist_id = Some(id);
        self
    }

    pub fn create_stock(mut self, create: bool) -> Self {
        self.shipping.create_stock = create;
        self
    }

    pub fn shipping(mut self, shipping: ShippingAttributes) -> Self {
        self.shipping = shipping;
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Build a draft invoice and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, StockError> {
        if self.lines.len() > 10_000 {
            return Err(StockError::Validation(
                "invoice cannot have more than 10,000 lines".into(),
            ));
        }

        let invoice = self.build_unchecked();
        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            return Err(StockError::from_validation(&errors));
        }
        Ok(invoice)
    }

    /// Build without validation, e.g. for importing external data.
    pub fn build_unchecked(self) -> Invoice {
        Invoice {
            id: InvoiceId::default(),
            number: None,
            name: self.name,
            invoice_type: self.invoice_type,
            state: InvoiceState::Draft,
            partner_id: self.partner_id,
            company_id: self.company_id,
            currency_id: self.currency_id,
            date_invoice: self.date_invoice,
            date: self.date,
            origin: self.origin,
            reconciled: false,
            refund_invoice_id: None,
            lines: self.lines,
            shipping: self.shipping,
        }
    }
}

/// Builder for invoice lines.
pub struct InvoiceLineBuilder {
    name: String,
    quantity: Decimal,
    price_unit: Decimal,
    product_id: Option<ProductId>,
    uom_id: Option<UomId>,
    tax_ids: Vec<TaxId>,
}

impl InvoiceLineBuilder {
    pub fn new(name: impl Into<String>, quantity: Decimal, price_unit: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            price_unit,
            product_id: None,
            uom_id: None,
            tax_ids: Vec::new(),
        }
    }

    pub fn product(mut self, id: ProductId) -> Self {
        self.product_id = Some(id);
        self
    }

    pub fn uom(mut self, id: UomId) -> Self {
        self.uom_id = Some(id);
        self
    }

    pub fn tax(mut self, id: TaxId) -> Self {
        self.tax_ids.push(id);
        self
    }

    pub fn build(self) -> InvoiceLine {
        InvoiceLine {
            id: InvoiceLineId::default(),
            name: self.name,
            product_id: self.product_id,
            uom_id: self.uom_id,
            quantity: self.quantity,
            price_unit: self.price_unit,
            tax_ids: self.tax_ids,
        }
    }
}
