//! Sales domain module.
//!
//! Sale order lines and their subscription schedule, as consumed by invoicing
//! (no IO, no HTTP, no storage).

pub mod order;
pub mod subscription;

pub use order::{SaleOrderLine, SaleOrderLineId};
pub use subscription::{Subscription, SubscriptionId};
