//! Core document types, builders, validation and numbering.
//!
//! The types mirror the accounting and inventory records the receipt
//! linker reads and writes: invoices with their shipping attributes,
//! pickings, stock moves and the master data they reference.

mod builder;
mod context;
mod error;
mod numbering;
pub mod rounding;
mod types;
mod validation;

pub use builder::*;
pub use context::*;
pub use error::*;
pub use numbering::*;
pub use types::*;
pub use validation::*;
