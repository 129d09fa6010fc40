use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyline_accounting::{AnalyticDistributionLine, TaxLine};
use supplyline_core::{DomainResult, Entity, record_id};
use supplyline_products::{DiscountType, Product, ProductId, Unit};

use crate::subscription::Subscription;

record_id!(
    /// Sale order line identifier.
    SaleOrderLineId
);

/// Sale order line: product, quantity, pricing and cost allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleOrderLine {
    pub id: SaleOrderLineId,
    pub product_id: Option<ProductId>,
    pub quantity: Decimal,
    pub unit: Option<Unit>,
    pub price: Decimal,
    pub price_discounted: Decimal,
    pub discount_amount: Decimal,
    pub discount_type: DiscountType,
    pub tax_line: Option<TaxLine>,
    /// Section heading, not a billable line.
    pub is_title_line: bool,
    pub analytic_distribution_lines: Vec<AnalyticDistributionLine>,
    /// Billing periods, for subscriptable products.
    pub subscriptions: Vec<Subscription>,
}

impl SaleOrderLine {
    /// Undiscounted, untaxed line for `product` in its sales unit.
    pub fn new(product: &Product, quantity: Decimal, price: Decimal) -> Self {
        Self {
            id: SaleOrderLineId::generate(),
            product_id: Some(product.id),
            quantity,
            unit: product.sales_unit.clone(),
            price,
            price_discounted: price,
            discount_amount: Decimal::ZERO,
            discount_type: DiscountType::None,
            tax_line: None,
            is_title_line: false,
            analytic_distribution_lines: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Set the discount and recompute the discounted price.
    pub fn with_discount(mut self, discount_type: DiscountType, amount: Decimal) -> DomainResult<Self> {
        self.price_discounted = discount_type.apply(self.price, amount)?;
        self.discount_type = discount_type;
        self.discount_amount = amount;
        Ok(self)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Entity for SaleOrderLine {
    type Id = SaleOrderLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
