use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use supplyline_core::{DomainError, DomainResult, Entity, record_id};

record_id!(
    /// Subscription period identifier.
    SubscriptionId
);

/// One billing period of a subscribed sale order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub from_period_date: NaiveDate,
    pub to_period_date: NaiveDate,
    pub invoicing_date: Option<NaiveDate>,
    pub invoiced: bool,
}

impl Subscription {
    /// Fails when the period ends before it starts.
    pub fn new(from_period_date: NaiveDate, to_period_date: NaiveDate) -> DomainResult<Self> {
        if to_period_date < from_period_date {
            return Err(DomainError::validation(format!(
                "subscription period ends ({to_period_date}) before it starts ({from_period_date})"
            )));
        }
        Ok(Self {
            id: SubscriptionId::generate(),
            from_period_date,
            to_period_date,
            invoicing_date: None,
            invoiced: false,
        })
    }
}

impl Entity for Subscription {
    type Id = SubscriptionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_period_is_not_invoiced() {
        let sub = Subscription::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(!sub.invoiced);
        assert_eq!(sub.invoicing_date, None);
    }

    #[test]
    fn inverted_period_is_rejected() {
        let err = Subscription::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
