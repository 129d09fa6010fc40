use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyline_core::{DomainError, DomainResult, Entity, record_id};

record_id!(
    /// Tax line identifier.
    TaxLineId
);

/// A dated tax rate (e.g. "VAT 20%").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    pub id: TaxLineId,
    pub tax_code: String,
    /// Fraction, e.g. `0.20` for 20%.
    pub rate: Decimal,
}

impl TaxLine {
    pub fn new(tax_code: impl Into<String>, rate: Decimal) -> Self {
        Self {
            id: TaxLineId::generate(),
            tax_code: tax_code.into(),
            rate,
        }
    }

    /// `1 + rate`.
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.rate
    }

    /// Add this tax to an untaxed amount (unrounded).
    pub fn taxed(&self, untaxed: Decimal) -> DomainResult<Decimal> {
        untaxed
            .checked_mul(self.multiplier())
            .ok_or_else(DomainError::amount_overflow)
    }

    /// Remove this tax from a tax-inclusive amount (unrounded).
    ///
    /// A rate of -100% has no inverse and is rejected.
    pub fn untaxed(&self, taxed: Decimal) -> DomainResult<Decimal> {
        let multiplier = self.multiplier();
        if multiplier.is_zero() {
            return Err(DomainError::validation(format!(
                "tax {} cannot be removed from a tax-inclusive amount",
                self.tax_code
            )));
        }
        taxed
            .checked_div(multiplier)
            .ok_or_else(DomainError::amount_overflow)
    }
}

impl Entity for TaxLine {
    type Id = TaxLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
