//! Unit, currency and tax arithmetic used to cost generated stock moves.
//!
//! These are minimal deterministic renditions of the accounting host's
//! computations: dated currency rates against the company currency,
//! factor-based unit conversion within a category, and sequential
//! percent/fixed/division taxes. Nothing here rounds.

mod currency;
mod tax;
mod uom;

pub use currency::convert;
pub use tax::{TaxAmount, TaxTotals, compute_all};
pub use uom::{convert_quantity, price_factor};
