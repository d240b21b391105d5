//! Receipts generated from vendor bills.
//!
//! [`reconcile`] computes what an invoice line still has to move and at
//! which cost, [`moves`] turns that into stock moves, [`picking`] creates or
//! reuses the receipt holding them and [`returns`] covers the picking
//! lifecycle used when invoices are refunded.

pub mod moves;
pub mod picking;
pub mod reconcile;
pub mod returns;

pub use moves::{create_stock_moves, prepare_stock_moves};
pub use picking::{
    action_create_picking, destination_location, prepare_picking, receipt_origin_note,
    supplier_location,
};
pub use reconcile::{
    MoveQuote, quote_line, reserved_quantity, residual_quantity, stock_move_price_unit,
};
pub use returns::{cancel_picking, confirm_picking, create_return, validate_picking};
