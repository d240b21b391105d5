//! Invoice hooks: approval with receipt generation, refunds that reverse
//! receipts, and the invoice-side receipt actions.

mod actions;
mod approval;
mod refund;

pub use actions::{
    DeliveryAction, action_view_delivery, default_picking_type, default_shipping,
    default_warehouse, onchange_partner_pricelist, onchange_warehouse,
};
pub use approval::{action_invoice_open, open_invoice};
pub use refund::{
    InvoiceFamily, RefundMode, RefundOutcome, RefundRequest, check_refundable, compute_refund,
};
