//! Invoicing domain module.
//!
//! Derives invoice lines from sale order, purchase order and stock move lines,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! Unit conversion, pricing and settings are collaborators supplied by the host.

pub mod generator;
pub mod invoice;
pub mod pricing;
pub mod settings;
pub mod source;

pub use generator::{
    InvoiceLineDeriver, InvoiceLineRequest, sale_or_purchase_unit, split_subscription_totals,
};
pub use invoice::{
    AMOUNT_SCALE, Invoice, InvoiceId, InvoiceLine, InvoiceLineId, InvoiceOperationType,
    is_purchase, round_amount,
};
pub use pricing::{CatalogPricing, InvoiceLinePricing};
pub use settings::{InvoicingConfig, InvoicingSettings};
pub use source::SourceLine;
