use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyline_core::{Entity, record_id};

record_id!(
    /// Analytic distribution line identifier.
    AnalyticDistributionLineId
);

/// Share of a line amount allocated to one analytic account on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticDistributionLine {
    pub id: AnalyticDistributionLineId,
    pub analytic_axis: String,
    pub analytic_account: String,
    pub percentage: Decimal,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    /// Belongs to a distribution template rather than to a concrete line.
    pub is_template: bool,
}

impl AnalyticDistributionLine {
    pub fn new(
        analytic_axis: impl Into<String>,
        analytic_account: impl Into<String>,
        percentage: Decimal,
    ) -> Self {
        Self {
            id: AnalyticDistributionLineId::generate(),
            analytic_axis: analytic_axis.into(),
            analytic_account: analytic_account.into(),
            percentage,
            amount: Decimal::ZERO,
            date: None,
            is_template: false,
        }
    }

    /// Independent duplicate attached to a concrete line: every field is
    /// carried over except the identity, and the copy is never a template.
    pub fn duplicate(&self) -> Self {
        Self {
            id: AnalyticDistributionLineId::generate(),
            is_template: false,
            ..self.clone()
        }
    }
}

impl Entity for AnalyticDistributionLine {
    type Id = AnalyticDistributionLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Duplicate every entry of `source`, preserving order. `None` or an empty
/// slice yields an empty list.
pub fn copy_analytic_distribution_lines(
    source: Option<&[AnalyticDistributionLine]>,
) -> Vec<AnalyticDistributionLine> {
    source
        .unwrap_or_default()
        .iter()
        .map(AnalyticDistributionLine::duplicate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(account: &str, pct: i64) -> AnalyticDistributionLine {
        AnalyticDistributionLine::new("DEPT", account, Decimal::from(pct))
    }

    #[test]
    fn duplicate_gets_fresh_identity_and_clears_template() {
        let mut original = line("SALES", 60);
        original.is_template = true;
        original.amount = Decimal::new(6000, 2);

        let copy = original.duplicate();
        assert_ne!(copy.id, original.id);
        assert!(!copy.is_template);
        assert_eq!(copy.analytic_account, "SALES");
        assert_eq!(copy.amount, Decimal::new(6000, 2));
    }

    #[test]
    fn copy_preserves_order() {
        let source = vec![line("A", 60), line("B", 40)];
        let copies = copy_analytic_distribution_lines(Some(source.as_slice()));
        let accounts: Vec<_> = copies.iter().map(|l| l.analytic_account.as_str()).collect();
        assert_eq!(accounts, ["A", "B"]);
    }

    #[test]
    fn copy_of_nothing_is_empty() {
        assert!(copy_analytic_distribution_lines(None).is_empty());
        assert!(copy_analytic_distribution_lines(Some(&[][..])).is_empty());
    }
}
