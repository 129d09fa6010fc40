//! Unit price lookup collaborator.

use rust_decimal::{Decimal, RoundingStrategy};

use supplyline_accounting::TaxLine;
use supplyline_core::{DomainError, DomainResult};
use supplyline_products::Product;

use crate::invoice::{Invoice, InvoiceLine};
use crate::settings::{DEFAULT_UNIT_PRICE_DECIMALS, InvoicingConfig};

/// Values an invoice line from the catalog (or any host pricing engine).
pub trait InvoiceLinePricing {
    /// Unit price of `line` on `invoice`, on the purchase side when `is_purchase`.
    fn unit_price(
        &self,
        invoice: &Invoice,
        line: &InvoiceLine,
        product: &Product,
        tax_line: Option<&TaxLine>,
        is_purchase: bool,
    ) -> DomainResult<Decimal>;
}

impl<T: InvoiceLinePricing + ?Sized> InvoiceLinePricing for &T {
    fn unit_price(
        &self,
        invoice: &Invoice,
        line: &InvoiceLine,
        product: &Product,
        tax_line: Option<&TaxLine>,
        is_purchase: bool,
    ) -> DomainResult<Decimal> {
        (**self).unit_price(invoice, line, product, tax_line, is_purchase)
    }
}

/// Prices from the product's catalog sale/purchase price.
///
/// When the catalog price and the invoice disagree on tax inclusion, the price
/// is moved across the tax line's rate and rounded half-even to
/// `unit_price_scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogPricing {
    unit_price_scale: u32,
}

impl Default for CatalogPricing {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_PRICE_DECIMALS)
    }
}

impl CatalogPricing {
    pub fn new(unit_price_scale: u32) -> Self {
        Self { unit_price_scale }
    }

    pub fn from_config(config: &InvoicingConfig) -> Self {
        Self::new(config.nb_decimal_digit_for_unit_price)
    }

    fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.unit_price_scale, RoundingStrategy::MidpointNearestEven)
    }
}

impl InvoiceLinePricing for CatalogPricing {
    fn unit_price(
        &self,
        invoice: &Invoice,
        _line: &InvoiceLine,
        product: &Product,
        tax_line: Option<&TaxLine>,
        is_purchase: bool,
    ) -> DomainResult<Decimal> {
        let side = if is_purchase { "purchase" } else { "sale" };
        let price = product.catalog_price(is_purchase).ok_or_else(|| {
            DomainError::missing_price(format!("no {side} price for product {}", product.code))
        })?;

        let Some(tax_line) = tax_line else {
            return Ok(price);
        };

        let price = match (product.in_ati, invoice.in_ati) {
            (true, false) => self.round(tax_line.untaxed(price)?),
            (false, true) => self.round(tax_line.taxed(price)?),
            _ => price,
        };
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{InvoiceId, InvoiceLineId, InvoiceOperationType};
    use supplyline_products::{DiscountType, ProductType};

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product() -> Product {
        let mut product = Product::new("LAMP", "Desk lamp", ProductType::Storable);
        product.sale_price = Some(d("24.00"));
        product.purchase_price = Some(d("15.00"));
        product
    }

    fn blank_line(invoice_id: InvoiceId) -> InvoiceLine {
        InvoiceLine {
            id: InvoiceLineId::generate(),
            invoice_id,
            sequence: 0,
            product_id: None,
            product_name: String::new(),
            description: None,
            quantity: Decimal::ONE,
            unit: None,
            price: Decimal::ZERO,
            price_discounted: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            discount_type: DiscountType::None,
            tax_line: None,
            ex_tax_total: Decimal::ZERO,
            in_tax_total: Decimal::ZERO,
            is_title_line: false,
            is_tax_invoice: false,
            sale_order_line: None,
            purchase_order_line: None,
            incoming_stock_move: None,
            outgoing_stock_move: None,
            analytic_distribution_lines: Vec::new(),
            budget_distributions: Vec::new(),
            budget: None,
            subscription_from_date: None,
            subscription_to_date: None,
        }
    }

    #[test]
    fn picks_price_by_side() {
        let invoice = Invoice::new(InvoiceOperationType::ClientSale);
        let line = blank_line(invoice.id);
        let pricing = CatalogPricing::default();

        assert_eq!(
            pricing.unit_price(&invoice, &line, &product(), None, false).unwrap(),
            d("24.00")
        );
        assert_eq!(
            pricing.unit_price(&invoice, &line, &product(), None, true).unwrap(),
            d("15.00")
        );
    }

    #[test]
    fn tax_inclusive_catalog_price_is_untaxed_for_untaxed_invoice() {
        let invoice = Invoice::new(InvoiceOperationType::ClientSale);
        let line = blank_line(invoice.id);
        let mut product = product();
        product.in_ati = true;
        let vat = TaxLine::new("VAT20", d("0.20"));

        let price = CatalogPricing::default()
            .unit_price(&invoice, &line, &product, Some(&vat), false)
            .unwrap();
        assert_eq!(price, d("20.00"));
    }

    #[test]
    fn untaxed_catalog_price_is_taxed_for_tax_inclusive_invoice() {
        let mut invoice = Invoice::new(InvoiceOperationType::ClientSale);
        invoice.in_ati = true;
        let line = blank_line(invoice.id);
        let vat = TaxLine::new("VAT55", d("0.055"));

        let price = CatalogPricing::new(3)
            .unit_price(&invoice, &line, &product(), Some(&vat), false)
            .unwrap();
        assert_eq!(price, d("25.320"));
    }

    #[test]
    fn untaxing_rounds_half_even() {
        let invoice = Invoice::new(InvoiceOperationType::ClientSale);
        let line = blank_line(invoice.id);
        let mut product = product();
        product.in_ati = true;
        product.sale_price = Some(d("0.03"));
        let vat = TaxLine::new("VAT20", d("0.20"));

        // 0.03 / 1.20 = 0.025
        let price = CatalogPricing::default()
            .unit_price(&invoice, &line, &product, Some(&vat), false)
            .unwrap();
        assert_eq!(price, d("0.02"));
    }

    #[test]
    fn scale_comes_from_config() {
        let mut invoice = Invoice::new(InvoiceOperationType::ClientSale);
        invoice.in_ati = true;
        let line = blank_line(invoice.id);
        let vat = TaxLine::new("VAT55", d("0.055"));
        let config = InvoicingConfig {
            nb_decimal_digit_for_unit_price: 1,
            ..InvoicingConfig::default()
        };

        // 24.00 * 1.055 = 25.32
        let price = CatalogPricing::from_config(&config)
            .unit_price(&invoice, &line, &product(), Some(&vat), false)
            .unwrap();
        assert_eq!(price, d("25.3"));
    }

    #[test]
    fn full_negative_tax_rate_is_rejected() {
        let invoice = Invoice::new(InvoiceOperationType::ClientSale);
        let line = blank_line(invoice.id);
        let mut product = product();
        product.in_ati = true;
        let broken = TaxLine::new("NEG", d("-1"));

        let err = CatalogPricing::default()
            .unit_price(&invoice, &line, &product, Some(&broken), false)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn missing_catalog_price_is_an_error() {
        let invoice = Invoice::new(InvoiceOperationType::SupplierPurchase);
        let line = blank_line(invoice.id);
        let mut product = product();
        product.purchase_price = None;

        let err = CatalogPricing::default()
            .unit_price(&invoice, &line, &product, None, true)
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingPrice(msg) if msg.contains("LAMP")));
    }
}
