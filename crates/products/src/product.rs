use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyline_core::{Entity, record_id};

use crate::unit::Unit;

record_id!(
    /// Product identifier.
    ProductId
);

/// Product type; drives how invoicing treats the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Storable,
    Service,
    /// Billed over recurring periods; invoice totals are split per period.
    Subscriptable,
}

/// Catalog product, as seen by invoicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    pub product_type: ProductType,
    /// Stock-keeping unit.
    pub unit: Option<Unit>,
    pub sales_unit: Option<Unit>,
    pub purchases_unit: Option<Unit>,
    pub sale_price: Option<Decimal>,
    pub purchase_price: Option<Decimal>,
    /// Catalog prices include tax.
    pub in_ati: bool,
}

impl Product {
    pub fn new(code: impl Into<String>, name: impl Into<String>, product_type: ProductType) -> Self {
        Self {
            id: ProductId::generate(),
            code: code.into(),
            name: name.into(),
            product_type,
            unit: None,
            sales_unit: None,
            purchases_unit: None,
            sale_price: None,
            purchase_price: None,
            in_ati: false,
        }
    }

    pub fn is_subscriptable(&self) -> bool {
        self.product_type == ProductType::Subscriptable
    }

    /// Unit the product is traded in on the given side.
    ///
    /// `None` when the side-specific unit is not configured; the stock unit is
    /// never substituted.
    pub fn trading_unit(&self, purchase: bool) -> Option<&Unit> {
        if purchase {
            self.purchases_unit.as_ref()
        } else {
            self.sales_unit.as_ref()
        }
    }

    /// Catalog price on the given side.
    pub fn catalog_price(&self, purchase: bool) -> Option<Decimal> {
        if purchase {
            self.purchase_price
        } else {
            self.sale_price
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
