#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use wareneingang::config::StockConfig;
use wareneingang::core::*;
use wareneingang::invoice::action_invoice_open;
use wareneingang::store::Store;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One company with a main warehouse, EUR base currency and USD rates,
/// vendors with and without a vendor location, and a few products.
pub struct Fixture {
    pub store: Store,
    pub ctx: Context,
    pub config: StockConfig,
    pub company: CompanyId,
    pub eur: CurrencyId,
    pub usd: CurrencyId,
    pub unit: UomId,
    pub dozen: UomId,
    pub vendors: LocationId,
    pub stock: LocationId,
    pub wh: WarehouseId,
    pub route: RouteId,
    pub receipts: PickingTypeId,
    pub vendor_returns: PickingTypeId,
    pub deliveries: PickingTypeId,
    pub pricelist: PricelistId,
    pub vendor: PartnerId,
    pub vendor_without_location: PartnerId,
    pub screws: ProductId,
    pub oil: ProductId,
    pub consulting: ProductId,
    pub vat19: TaxId,
    pub vat19_included: TaxId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut store = Store::new();
        let eur = store.add_currency(Currency::new("EUR"));
        let usd = store.add_currency(
            Currency::new("USD")
                .rate(date(2024, 1, 1), dec!(1.10))
                .rate(date(2024, 6, 1), dec!(1.25)),
        );
        let company = store.add_company(Company::new("ACME GmbH", eur));
        let unit = store.add_uom(Uom::new("Unit", "Unit", dec!(1), dec!(0.01)));
        let dozen = store.add_uom(Uom::new("Dozen", "Unit", dec!(1) / dec!(12), dec!(0.01)));

        let vendors = store.add_location(Location::new("Partner Locations/Vendors", LocationUsage::Supplier));
        let stock = store.add_location(Location::new("WH/Stock", LocationUsage::Internal));

        let route = RouteId(900);
        let wh = store.add_warehouse(Warehouse::new("Main Warehouse", "WH", company).route(route));
        let vendor_returns = store.add_picking_type(
            PickingType::new("Vendor Returns", PickingTypeCode::Outgoing, "WH/RET/")
                .warehouse(wh)
                .default_source(stock)
                .default_destination(vendors),
        );
        let receipts = store.add_picking_type(
            PickingType::new("Receipts", PickingTypeCode::Incoming, "WH/IN/")
                .warehouse(wh)
                .default_source(vendors)
                .default_destination(stock)
                .return_type(vendor_returns),
        );
        let deliveries = store.add_picking_type(
            PickingType::new("Delivery Orders", PickingTypeCode::Outgoing, "WH/OUT/")
                .warehouse(wh)
                .default_source(stock),
        );

        let pricelist = store.add_pricelist(Pricelist::new("Public Pricelist", eur));
        let vendor = store.add_partner(
            Partner::new("Schrauben AG")
                .supplier_location(vendors)
                .pricelist(pricelist),
        );
        let vendor_without_location = store.add_partner(Partner::new("Nowhere Ltd"));

        let screws = store.add_product(Product::new("Screws M4", ProductType::Product, unit));
        let oil = store.add_product(Product::new("Machine oil", ProductType::Consumable, unit));
        let consulting = store.add_product(Product::new("Consulting", ProductType::Service, unit));

        let vat19 = store.add_tax(Tax::new("VAT 19%", TaxAmountType::Percent, dec!(19)));
        let vat19_included = store.add_tax(
            Tax::new("VAT 19% incl.", TaxAmountType::Percent, dec!(19)).price_include(true),
        );

        Self {
            store,
            ctx: Context::new(company, UserId(1), date(2024, 6, 15)),
            config: StockConfig::default(),
            company,
            eur,
            usd,
            unit,
            dozen,
            vendors,
            stock,
            wh,
            route,
            receipts,
            vendor_returns,
            deliveries,
            pricelist,
            vendor,
            vendor_without_location,
            screws,
            oil,
            consulting,
            vat19,
            vat19_included,
        }
    }

    /// Vendor bill with the stock flag, warehouse and receipt type set.
    pub fn bill(&self) -> InvoiceBuilder {
        InvoiceBuilder::vendor_bill(self.vendor, self.company, self.eur)
            .date_invoice(date(2024, 6, 15))
            .warehouse(self.wh)
            .picking_type(self.receipts)
            .create_stock(true)
    }

    pub fn screws_line(&self, qty: rust_decimal::Decimal) -> InvoiceLine {
        InvoiceLineBuilder::new("Screws M4", qty, dec!(0.50))
            .product(self.screws)
            .build()
    }

    pub fn create(&mut self, builder: InvoiceBuilder) -> InvoiceId {
        let invoice = builder.build().unwrap();
        self.store.create_invoice(invoice)
    }

    pub fn approve(&mut self, invoices: &[InvoiceId]) -> Result<Vec<PickingId>, StockError> {
        action_invoice_open(&mut self.store, &self.ctx, &self.config, invoices)
    }

    pub fn pickings_of(&self, invoice: InvoiceId) -> Vec<Picking> {
        self.store
            .invoice_pickings(invoice)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn moves_of(&self, picking: PickingId) -> Vec<StockMove> {
        self.store
            .picking_moves(picking)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn line_id(&self, invoice: InvoiceId, index: usize) -> InvoiceLineId {
        self.store.invoice(invoice).unwrap().lines[index].id
    }
}
