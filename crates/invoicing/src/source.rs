use supplyline_inventory::StockMoveLine;
use supplyline_purchasing::PurchaseOrderLine;
use supplyline_sales::SaleOrderLine;

/// The line an invoice line originates from. At most one source per invoice line.
#[derive(Debug, Clone, Copy, Default)]
pub enum SourceLine<'a> {
    Sale(&'a SaleOrderLine),
    Purchase(&'a PurchaseOrderLine),
    StockMove(&'a StockMoveLine),
    #[default]
    None,
}

impl<'a> SourceLine<'a> {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceLine::Sale(_) => "sale_order_line",
            SourceLine::Purchase(_) => "purchase_order_line",
            SourceLine::StockMove(_) => "stock_move_line",
            SourceLine::None => "none",
        }
    }

    pub fn sale_order_line(&self) -> Option<&'a SaleOrderLine> {
        match *self {
            SourceLine::Sale(line) => Some(line),
            _ => None,
        }
    }

    pub fn purchase_order_line(&self) -> Option<&'a PurchaseOrderLine> {
        match *self {
            SourceLine::Purchase(line) => Some(line),
            _ => None,
        }
    }

    pub fn stock_move_line(&self) -> Option<&'a StockMoveLine> {
        match *self {
            SourceLine::StockMove(line) => Some(line),
            _ => None,
        }
    }
}

impl<'a> From<&'a SaleOrderLine> for SourceLine<'a> {
    fn from(line: &'a SaleOrderLine) -> Self {
        SourceLine::Sale(line)
    }
}

impl<'a> From<&'a PurchaseOrderLine> for SourceLine<'a> {
    fn from(line: &'a PurchaseOrderLine) -> Self {
        SourceLine::Purchase(line)
    }
}

impl<'a> From<&'a StockMoveLine> for SourceLine<'a> {
    fn from(line: &'a StockMoveLine) -> Self {
        SourceLine::StockMove(line)
    }
}
