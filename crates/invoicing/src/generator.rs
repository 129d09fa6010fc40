//! Invoice line derivation from sale order, purchase order and stock move lines.
//!
//! Derivation runs in three steps:
//!
//! ```text
//! request + source line
//!   ↓
//! 1. Seed: copy pricing fields from the source (stock moves: switch to the
//!    product's sale/purchase unit)
//!   ↓
//! 2. Base line: discounted price, ex-tax and in-tax totals
//!   ↓
//! 3. Finalize: subscription split, origin links, distributions, stock-move
//!    repricing
//! ```
//!
//! Collaborators (unit conversion, pricing, settings) are injected at
//! construction. Any collaborator failure aborts the derivation; no partially
//! built line is ever returned.

use rust_decimal::{Decimal, RoundingStrategy};

use supplyline_accounting::{TaxLine, copy_analytic_distribution_lines, copy_budget_distributions};
use supplyline_core::{DomainError, DomainResult};
use supplyline_products::{DiscountType, Product, Unit, UnitConversion};
use supplyline_sales::Subscription;

use crate::invoice::{AMOUNT_SCALE, Invoice, InvoiceLine, InvoiceLineId, round_amount};
use crate::pricing::InvoiceLinePricing;
use crate::settings::InvoicingSettings;
use crate::source::SourceLine;

/// Caller-supplied inputs for one invoice line.
///
/// Price hints are used as-is when no source line overrides them.
#[derive(Debug, Clone)]
pub struct InvoiceLineRequest<'a> {
    pub invoice: &'a Invoice,
    pub product: &'a Product,
    pub product_name: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit: Option<Unit>,
    pub sequence: u32,
    pub is_tax_invoice: bool,
    pub price: Decimal,
    pub discount_type: DiscountType,
    pub discount_amount: Decimal,
    pub tax_line: Option<TaxLine>,
}

impl<'a> InvoiceLineRequest<'a> {
    /// Request named after the product, without price hints.
    pub fn new(
        invoice: &'a Invoice,
        product: &'a Product,
        quantity: Decimal,
        unit: Option<Unit>,
    ) -> Self {
        Self {
            invoice,
            product,
            product_name: product.name.clone(),
            description: None,
            quantity,
            unit,
            sequence: 0,
            is_tax_invoice: false,
            price: Decimal::ZERO,
            discount_type: DiscountType::None,
            discount_amount: Decimal::ZERO,
            tax_line: None,
        }
    }
}

/// Working state between seeding and base line creation.
#[derive(Debug)]
struct LineDraft<'a> {
    invoice: &'a Invoice,
    product: &'a Product,
    product_name: String,
    description: Option<String>,
    quantity: Decimal,
    unit: Option<Unit>,
    sequence: u32,
    is_tax_invoice: bool,
    price: Decimal,
    /// `None` unless a source provides it; the base line then derives it from
    /// the discount.
    price_discounted: Option<Decimal>,
    discount_type: DiscountType,
    discount_amount: Decimal,
    tax_line: Option<TaxLine>,
    is_title_line: bool,
}

impl<'a> From<InvoiceLineRequest<'a>> for LineDraft<'a> {
    fn from(request: InvoiceLineRequest<'a>) -> Self {
        Self {
            invoice: request.invoice,
            product: request.product,
            product_name: request.product_name,
            description: request.description,
            quantity: request.quantity,
            unit: request.unit,
            sequence: request.sequence,
            is_tax_invoice: request.is_tax_invoice,
            price: request.price,
            price_discounted: None,
            discount_type: request.discount_type,
            discount_amount: request.discount_amount,
            tax_line: request.tax_line,
            is_title_line: false,
        }
    }
}

/// Unit `product` is traded in on `invoice`'s side: sales unit for customer
/// invoices, purchases unit for supplier invoices.
pub fn sale_or_purchase_unit<'p>(invoice: &Invoice, product: &'p Product) -> Option<&'p Unit> {
    product.trading_unit(invoice.is_purchase())
}

/// Share of `(ex_tax_total, in_tax_total)` billed per subscription period.
///
/// Totals are returned unchanged for fewer than two periods.
pub fn split_subscription_totals(
    ex_tax_total: Decimal,
    in_tax_total: Decimal,
    periods: usize,
) -> (Decimal, Decimal) {
    if periods < 2 {
        return (ex_tax_total, in_tax_total);
    }
    let periods = Decimal::from(periods as u64);
    let share = |total: Decimal| {
        (total / periods).round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven)
    };
    (share(ex_tax_total), share(in_tax_total))
}

/// Builds invoice lines from order and stock move lines.
#[derive(Debug, Clone)]
pub struct InvoiceLineDeriver<C, P, S> {
    conversion: C,
    pricing: P,
    settings: S,
}

impl<C, P, S> InvoiceLineDeriver<C, P, S> {
    pub fn new(conversion: C, pricing: P, settings: S) -> Self {
        Self {
            conversion,
            pricing,
            settings,
        }
    }
}

impl<C, P, S> InvoiceLineDeriver<C, P, S>
where
    C: UnitConversion,
    P: InvoiceLinePricing,
    S: InvoicingSettings,
{
    /// Derive one fully populated invoice line.
    ///
    /// `source` is the line being invoiced, if any; `subscription` is the period
    /// billed when invoicing a subscription.
    pub fn derive_invoice_line(
        &self,
        request: InvoiceLineRequest<'_>,
        source: SourceLine<'_>,
        subscription: Option<&Subscription>,
    ) -> DomainResult<InvoiceLine> {
        let span = tracing::debug_span!(
            "derive_invoice_line",
            invoice = %request.invoice.id,
            sequence = request.sequence,
            source = source.kind(),
        );
        let _guard = span.enter();

        let draft = self.seed(request, source)?;
        let (invoice, product) = (draft.invoice, draft.product);

        let mut line = create_base_line(draft, subscription)?;
        self.finalize(&mut line, invoice, product, source)?;

        tracing::debug!(
            ex_tax_total = %line.ex_tax_total,
            in_tax_total = %line.in_tax_total,
            "invoice line derived"
        );
        Ok(line)
    }

    /// Link `line` to the order line or stock move it invoices.
    ///
    /// Does nothing unless invoiced amounts are managed by line.
    pub fn assign_origin_elements(
        &self,
        line: &mut InvoiceLine,
        invoice: &Invoice,
        source: SourceLine<'_>,
    ) {
        if !self.settings.manage_invoiced_amount_by_line() {
            return;
        }

        if let Some(stock_move) = source.stock_move_line().and_then(|l| l.stock_move) {
            if invoice.is_purchase() {
                line.incoming_stock_move = Some(stock_move);
            } else {
                line.outgoing_stock_move = Some(stock_move);
            }
        }
        if let Some(sale_order_line) = source.sale_order_line() {
            line.sale_order_line = Some(sale_order_line.id);
        }
        if let Some(purchase_order_line) = source.purchase_order_line() {
            line.purchase_order_line = Some(purchase_order_line.id);
        }

        tracing::trace!(
            sale_order_line = ?line.sale_order_line,
            purchase_order_line = ?line.purchase_order_line,
            incoming_stock_move = ?line.incoming_stock_move,
            outgoing_stock_move = ?line.outgoing_stock_move,
            "origin elements assigned"
        );
    }

    fn seed<'a>(
        &self,
        request: InvoiceLineRequest<'a>,
        source: SourceLine<'_>,
    ) -> DomainResult<LineDraft<'a>> {
        let mut draft = LineDraft::from(request);

        match source {
            SourceLine::Sale(line) => {
                draft.discount_amount = line.discount_amount;
                draft.price = line.price;
                draft.price_discounted = Some(line.price_discounted);
                draft.tax_line = line.tax_line.clone();
                draft.discount_type = line.discount_type;
                draft.is_title_line = line.is_title_line;
            }
            SourceLine::Purchase(line) => {
                draft.is_title_line = line.is_title_line;
                draft.discount_amount = line.discount_amount;
                draft.price = line.price;
                draft.price_discounted = Some(line.price_discounted);
                draft.tax_line = line.tax_line.clone();
                draft.discount_type = line.discount_type;
            }
            SourceLine::StockMove(line) => {
                draft.price_discounted = Some(line.unit_price_untaxed);

                let target = sale_or_purchase_unit(draft.invoice, draft.product);
                let converted = match (target, draft.unit.as_ref()) {
                    (Some(target), Some(current)) if target != current => {
                        let quantity =
                            self.conversion
                                .convert(current, target, draft.quantity, draft.product)?;
                        let price_discounted = self.conversion.convert(
                            current,
                            target,
                            line.unit_price_untaxed,
                            draft.product,
                        )?;
                        tracing::debug!(
                            from = %current,
                            to = %target,
                            %quantity,
                            %price_discounted,
                            "stock move line converted to trading unit"
                        );
                        Some((target, quantity, price_discounted))
                    }
                    _ => None,
                };

                if let Some((target, quantity, price_discounted)) = converted {
                    draft.quantity = quantity;
                    draft.price_discounted = Some(price_discounted);
                    draft.unit = Some(target.clone());
                }
            }
            SourceLine::None => {}
        }

        Ok(draft)
    }

    fn finalize(
        &self,
        line: &mut InvoiceLine,
        invoice: &Invoice,
        product: &Product,
        source: SourceLine<'_>,
    ) -> DomainResult<()> {
        if let Some(sale_order_line) = source.sale_order_line() {
            let periods = sale_order_line.subscription_count();
            if product.is_subscriptable() && periods >= 2 {
                let (ex_tax_total, in_tax_total) =
                    split_subscription_totals(line.ex_tax_total, line.in_tax_total, periods);
                tracing::debug!(periods, %ex_tax_total, %in_tax_total, "totals split per subscription period");
                line.ex_tax_total = ex_tax_total;
                line.in_tax_total = in_tax_total;
            }
        }

        self.assign_origin_elements(line, invoice, source);

        match source {
            SourceLine::Sale(sale_order_line) => {
                line.analytic_distribution_lines.extend(copy_analytic_distribution_lines(Some(
                    sale_order_line.analytic_distribution_lines.as_slice(),
                )));
            }
            SourceLine::Purchase(purchase_order_line) => {
                line.analytic_distribution_lines.extend(copy_analytic_distribution_lines(Some(
                    purchase_order_line.analytic_distribution_lines.as_slice(),
                )));
                line.budget_distributions.extend(copy_budget_distributions(Some(
                    purchase_order_line.budget_distributions.as_slice(),
                )));
                line.budget = purchase_order_line.budget;
            }
            SourceLine::StockMove(stock_move_line) => {
                let price = self.pricing.unit_price(
                    invoice,
                    line,
                    product,
                    line.tax_line.as_ref(),
                    invoice.is_purchase(),
                )?;
                let price = match (stock_move_line.unit.as_ref(), line.unit.as_ref()) {
                    (Some(from), Some(to)) if from != to => {
                        self.conversion.convert(from, to, price, product)?
                    }
                    _ => price,
                };
                line.price = price;
            }
            SourceLine::None => {}
        }

        Ok(())
    }
}

fn create_base_line(
    draft: LineDraft<'_>,
    subscription: Option<&Subscription>,
) -> DomainResult<InvoiceLine> {
    let price_discounted = match draft.price_discounted {
        Some(price_discounted) => price_discounted,
        None => draft.discount_type.apply(draft.price, draft.discount_amount)?,
    };

    let gross = draft
        .quantity
        .checked_mul(price_discounted)
        .ok_or_else(DomainError::amount_overflow)?;
    let (ex_tax_total, in_tax_total) = match (&draft.tax_line, draft.invoice.in_ati) {
        (None, _) => {
            let total = round_amount(gross);
            (total, total)
        }
        (Some(tax), false) => {
            let ex_tax_total = round_amount(gross);
            (ex_tax_total, round_amount(tax.taxed(ex_tax_total)?))
        }
        (Some(tax), true) => {
            let in_tax_total = round_amount(gross);
            (round_amount(tax.untaxed(in_tax_total)?), in_tax_total)
        }
    };

    Ok(InvoiceLine {
        id: InvoiceLineId::generate(),
        invoice_id: draft.invoice.id,
        sequence: draft.sequence,
        product_id: Some(draft.product.id),
        product_name: draft.product_name,
        description: draft.description,
        quantity: draft.quantity,
        unit: draft.unit,
        price: draft.price,
        price_discounted,
        discount_amount: draft.discount_amount,
        discount_type: draft.discount_type,
        tax_line: draft.tax_line,
        ex_tax_total,
        in_tax_total,
        is_title_line: draft.is_title_line,
        is_tax_invoice: draft.is_tax_invoice,
        sale_order_line: None,
        purchase_order_line: None,
        incoming_stock_move: None,
        outgoing_stock_move: None,
        analytic_distribution_lines: Vec::new(),
        budget_distributions: Vec::new(),
        budget: None,
        subscription_from_date: subscription.map(|s| s.from_period_date),
        subscription_to_date: subscription.map(|s| s.to_period_date),
    })
}
