use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyline_core::{DomainError, DomainResult};

/// How a line discount amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    None,
    /// `amount` is a percentage of the price.
    Percent,
    /// `amount` is subtracted from the price.
    Fixed,
}

impl DiscountType {
    /// Price after applying `amount` according to this discount type.
    pub fn apply(self, price: Decimal, amount: Decimal) -> DomainResult<Decimal> {
        let discounted = match self {
            DiscountType::None => Some(price),
            DiscountType::Percent => price
                .checked_mul(amount)
                .and_then(|off| off.checked_div(Decimal::ONE_HUNDRED))
                .and_then(|off| price.checked_sub(off)),
            DiscountType::Fixed => price.checked_sub(amount),
        };
        discounted.ok_or_else(DomainError::amount_overflow)
    }
}
