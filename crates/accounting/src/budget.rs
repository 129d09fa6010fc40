use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyline_core::{Entity, record_id};

record_id!(
    /// Budget identifier.
    BudgetId
);

record_id!(
    /// Budget distribution identifier.
    BudgetDistributionId
);

/// Amount of a line charged against one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetDistribution {
    pub id: BudgetDistributionId,
    pub budget: Option<BudgetId>,
    pub amount: Decimal,
}

impl BudgetDistribution {
    pub fn new(budget: Option<BudgetId>, amount: Decimal) -> Self {
        Self {
            id: BudgetDistributionId::generate(),
            budget,
            amount,
        }
    }

    /// Fresh record carrying only the budget and the amount.
    pub fn copy_values(&self) -> Self {
        Self::new(self.budget, self.amount)
    }
}

impl Entity for BudgetDistribution {
    type Id = BudgetDistributionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Copy budget and amount of every entry of `source`, preserving order.
pub fn copy_budget_distributions(source: Option<&[BudgetDistribution]>) -> Vec<BudgetDistribution> {
    source
        .unwrap_or_default()
        .iter()
        .map(BudgetDistribution::copy_values)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_are_new_records_with_same_values() {
        let budget = BudgetId::generate();
        let source = vec![
            BudgetDistribution::new(Some(budget), Decimal::new(5000, 2)),
            BudgetDistribution::new(Some(budget), Decimal::new(3000, 2)),
        ];

        let copies = copy_budget_distributions(Some(source.as_slice()));

        assert_eq!(copies.len(), 2);
        for (copy, original) in copies.iter().zip(&source) {
            assert_ne!(copy.id, original.id);
            assert_eq!(copy.budget, Some(budget));
            assert_eq!(copy.amount, original.amount);
        }
    }

    #[test]
    fn copy_of_nothing_is_empty() {
        assert!(copy_budget_distributions(None).is_empty());
    }
}
