use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyline_accounting::{AnalyticDistributionLine, BudgetDistribution, BudgetId, TaxLine};
use supplyline_core::{DomainResult, Entity, record_id};
use supplyline_products::{DiscountType, Product, ProductId, Unit};

record_id!(
    /// Purchase order line identifier.
    PurchaseOrderLineId
);

/// Purchase order line: product, quantity, pricing, cost and budget allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub id: PurchaseOrderLineId,
    pub product_id: Option<ProductId>,
    pub quantity: Decimal,
    pub unit: Option<Unit>,
    pub price: Decimal,
    pub price_discounted: Decimal,
    pub discount_amount: Decimal,
    pub discount_type: DiscountType,
    pub tax_line: Option<TaxLine>,
    pub is_title_line: bool,
    pub analytic_distribution_lines: Vec<AnalyticDistributionLine>,
    pub budget_distributions: Vec<BudgetDistribution>,
    pub budget: Option<BudgetId>,
}

impl PurchaseOrderLine {
    /// Undiscounted, untaxed line for `product` in its purchases unit.
    pub fn new(product: &Product, quantity: Decimal, price: Decimal) -> Self {
        Self {
            id: PurchaseOrderLineId::generate(),
            product_id: Some(product.id),
            quantity,
            unit: product.purchases_unit.clone(),
            price,
            price_discounted: price,
            discount_amount: Decimal::ZERO,
            discount_type: DiscountType::None,
            tax_line: None,
            is_title_line: false,
            analytic_distribution_lines: Vec::new(),
            budget_distributions: Vec::new(),
            budget: None,
        }
    }

    pub fn with_discount(mut self, discount_type: DiscountType, amount: Decimal) -> DomainResult<Self> {
        self.price_discounted = discount_type.apply(self.price, amount)?;
        self.discount_type = discount_type;
        self.discount_amount = amount;
        Ok(self)
    }
}

impl Entity for PurchaseOrderLine {
    type Id = PurchaseOrderLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
