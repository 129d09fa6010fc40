//! Products domain module.
//!
//! Catalog records, units of measure and the unit-conversion collaborator,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod conversion;
pub mod discount;
pub mod product;
pub mod unit;

pub use conversion::{UnitConversion, UnitConversionTable};
pub use discount::DiscountType;
pub use product::{Product, ProductId, ProductType};
pub use unit::Unit;
