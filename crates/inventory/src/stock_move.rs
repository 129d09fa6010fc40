use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyline_core::{Entity, record_id};
use supplyline_products::{Product, ProductId, Unit};

record_id!(
    /// Stock move (delivery or receipt) identifier.
    StockMoveId
);

record_id!(
    /// Stock move line identifier.
    StockMoveLineId
);

/// One product movement inside a delivery or a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMoveLine {
    pub id: StockMoveLineId,
    /// Owning move; `None` for a line not yet attached.
    pub stock_move: Option<StockMoveId>,
    pub product_id: Option<ProductId>,
    pub quantity: Decimal,
    pub unit: Option<Unit>,
    pub unit_price_untaxed: Decimal,
    pub unit_price_taxed: Decimal,
}

impl StockMoveLine {
    /// Line in the product's stock unit.
    pub fn new(
        stock_move: Option<StockMoveId>,
        product: &Product,
        quantity: Decimal,
        unit_price_untaxed: Decimal,
    ) -> Self {
        Self {
            id: StockMoveLineId::generate(),
            stock_move,
            product_id: Some(product.id),
            quantity,
            unit: product.unit.clone(),
            unit_price_untaxed,
            unit_price_taxed: unit_price_untaxed,
        }
    }
}

impl Entity for StockMoveLine {
    type Id = StockMoveLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
