//! Purchasing domain module.
//!
//! Purchase order lines with their analytic and budget allocations, as consumed
//! by invoicing (no IO, no HTTP, no storage).

pub mod order;

pub use order::{PurchaseOrderLine, PurchaseOrderLineId};
