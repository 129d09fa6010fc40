//! Accounting data holders used by invoicing: taxes, analytic and budget
//! distributions.
//!
//! Pure domain records only: no IO, no HTTP, no persistence concerns.

pub mod analytic;
pub mod budget;
pub mod tax;

pub use analytic::{AnalyticDistributionLine, AnalyticDistributionLineId, copy_analytic_distribution_lines};
pub use budget::{BudgetDistribution, BudgetDistributionId, BudgetId, copy_budget_distributions};
pub use tax::{TaxLine, TaxLineId};
