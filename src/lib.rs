//! # wareneingang
//!
//! Goods receipts generated from vendor bills.
//!
//! Approving a vendor bill that carries the stock flag creates (or reuses)
//! an incoming transfer for its stockable lines, with one stock move per line
//! for the quantity not yet covered by earlier moves. Refunding such a bill
//! returns done receipts, cancels open ones and mirrors the warehouse
//! attributes onto the credit note.
//!
//! All quantities and amounts use [`rust_decimal::Decimal`].
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use wareneingang::config::StockConfig;
//! use wareneingang::core::*;
//! use wareneingang::invoice::action_invoice_open;
//! use wareneingang::store::Store;
//!
//! let mut store = Store::new();
//! let eur = store.add_currency(Currency::new("EUR"));
//! let company = store.add_company(Company::new("ACME GmbH", eur));
//! let unit = store.add_uom(Uom::new("Unit", "Unit", dec!(1), dec!(0.01)));
//! let vendors = store.add_location(Location::new("Vendors", LocationUsage::Supplier));
//! let stock = store.add_location(Location::new("WH/Stock", LocationUsage::Internal));
//! let wh = store.add_warehouse(Warehouse::new("Main", "WH", company));
//! let receipts = store.add_picking_type(
//!     PickingType::new("Receipts", PickingTypeCode::Incoming, "WH/IN/")
//!         .warehouse(wh)
//!         .default_destination(stock),
//! );
//! let vendor = store.add_partner(Partner::new("Schrauben AG").supplier_location(vendors));
//! let screws = store.add_product(Product::new("Screws", ProductType::Product, unit));
//!
//! let bill = InvoiceBuilder::vendor_bill(vendor, company, eur)
//!     .date_invoice(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .warehouse(wh)
//!     .picking_type(receipts)
//!     .create_stock(true)
//!     .add_line(InvoiceLineBuilder::new("Screws", dec!(10), dec!(0.5)).product(screws).build())
//!     .build()
//!     .unwrap();
//! let bill = store.create_invoice(bill);
//!
//! let ctx = Context::new(company, UserId(1), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
//! let pickings = action_invoice_open(&mut store, &ctx, &StockConfig::default(), &[bill]).unwrap();
//!
//! assert_eq!(pickings.len(), 1);
//! let moves = store.picking_moves(pickings[0]);
//! assert_eq!(moves[0].product_uom_qty, dec!(10));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Records, store, receipt and refund actions |
//! | `json` | Load [`config::StockConfig`] from JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod config;

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod invoice;

#[cfg(feature = "core")]
pub mod pricing;

#[cfg(feature = "core")]
pub mod stock;

#[cfg(feature = "core")]
pub mod store;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
