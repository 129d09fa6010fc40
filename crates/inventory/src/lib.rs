//! Inventory domain module.
//!
//! Stock move lines, as consumed by invoicing (no IO, no HTTP, no storage).

pub mod stock_move;

pub use stock_move::{StockMoveId, StockMoveLine, StockMoveLineId};
