use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use supplyline_accounting::{AnalyticDistributionLine, BudgetDistribution, BudgetId, TaxLine};
use supplyline_core::{Entity, record_id};
use supplyline_inventory::StockMoveId;
use supplyline_products::{DiscountType, ProductId, Unit};
use supplyline_purchasing::PurchaseOrderLineId;
use supplyline_sales::SaleOrderLineId;

/// Decimals kept on line totals.
pub const AMOUNT_SCALE: u32 = 2;

/// Round a monetary amount to [`AMOUNT_SCALE`] decimals, half-even.
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven)
}

record_id!(
    /// Invoice identifier.
    InvoiceId
);

record_id!(
    /// Invoice line identifier.
    InvoiceLineId
);

/// What an invoice documents; decides the sale/purchase side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceOperationType {
    SupplierPurchase,
    SupplierRefund,
    ClientSale,
    ClientRefund,
}

impl InvoiceOperationType {
    pub fn is_purchase(self) -> bool {
        matches!(
            self,
            InvoiceOperationType::SupplierPurchase | InvoiceOperationType::SupplierRefund
        )
    }
}

/// Invoice header, as far as line derivation is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub operation_type: InvoiceOperationType,
    /// Line prices are entered tax-inclusive.
    pub in_ati: bool,
    pub invoice_date: Option<NaiveDate>,
}

impl Invoice {
    pub fn new(operation_type: InvoiceOperationType) -> Self {
        Self {
            id: InvoiceId::generate(),
            operation_type,
            in_ati: false,
            invoice_date: None,
        }
    }

    pub fn is_purchase(&self) -> bool {
        self.operation_type.is_purchase()
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// `true` for supplier invoices and supplier refunds.
pub fn is_purchase(invoice: &Invoice) -> bool {
    invoice.is_purchase()
}

/// One billable entry of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: InvoiceLineId,
    pub invoice_id: InvoiceId,
    pub sequence: u32,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit: Option<Unit>,
    pub price: Decimal,
    pub price_discounted: Decimal,
    pub discount_amount: Decimal,
    pub discount_type: DiscountType,
    pub tax_line: Option<TaxLine>,
    pub ex_tax_total: Decimal,
    pub in_tax_total: Decimal,
    pub is_title_line: bool,
    pub is_tax_invoice: bool,

    pub sale_order_line: Option<SaleOrderLineId>,
    pub purchase_order_line: Option<PurchaseOrderLineId>,
    /// Receipt this line invoices (supplier side).
    pub incoming_stock_move: Option<StockMoveId>,
    /// Delivery this line invoices (customer side).
    pub outgoing_stock_move: Option<StockMoveId>,

    pub analytic_distribution_lines: Vec<AnalyticDistributionLine>,
    pub budget_distributions: Vec<BudgetDistribution>,
    pub budget: Option<BudgetId>,

    pub subscription_from_date: Option<NaiveDate>,
    pub subscription_to_date: Option<NaiveDate>,
}

impl Entity for InvoiceLine {
    type Id = InvoiceLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
