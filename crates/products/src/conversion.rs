//! Unit conversion collaborator.
//!
//! Invoicing only depends on the [`UnitConversion`] trait. [`UnitConversionTable`]
//! is a coefficient-based implementation for hosts without their own service.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use supplyline_core::{DomainError, DomainResult};

use crate::product::{Product, ProductId};
use crate::unit::Unit;

/// Converts a quantity or a price between two units for a given product.
pub trait UnitConversion {
    /// Convert `value` expressed in `from` into `to`.
    ///
    /// Fails with [`DomainError::IncompatibleUnits`] when the units cannot be
    /// converted for this product.
    fn convert(&self, from: &Unit, to: &Unit, value: Decimal, product: &Product)
    -> DomainResult<Decimal>;
}

impl<T: UnitConversion + ?Sized> UnitConversion for &T {
    fn convert(
        &self,
        from: &Unit,
        to: &Unit,
        value: Decimal,
        product: &Product,
    ) -> DomainResult<Decimal> {
        (**self).convert(from, to, value, product)
    }
}

/// Default number of decimals kept on converted values.
pub const DEFAULT_CONVERSION_SCALE: u32 = 6;

type UnitPair = (String, String);

/// A registered coefficient and the direction it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coefficient {
    Multiply(Decimal),
    Divide(Decimal),
}

impl Coefficient {
    fn apply(self, value: Decimal) -> Option<Decimal> {
        match self {
            Coefficient::Multiply(coef) => value.checked_mul(coef),
            Coefficient::Divide(coef) => value.checked_div(coef),
        }
    }
}

/// Coefficient table: `value_in_to = value_in_from * coefficient`.
///
/// Lookup order: product-specific entry, then generic entry, each tried in the
/// registered direction first and then reversed (dividing by the coefficient).
#[derive(Debug, Clone)]
pub struct UnitConversionTable {
    generic: HashMap<UnitPair, Decimal>,
    per_product: HashMap<(ProductId, UnitPair), Decimal>,
    scale: u32,
}

impl Default for UnitConversionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitConversionTable {
    pub fn new() -> Self {
        Self::with_scale(DEFAULT_CONVERSION_SCALE)
    }

    pub fn with_scale(scale: u32) -> Self {
        Self {
            generic: HashMap::new(),
            per_product: HashMap::new(),
            scale,
        }
    }

    /// Register a conversion valid for every product.
    pub fn register(&mut self, from: &Unit, to: &Unit, coefficient: Decimal) -> DomainResult<()> {
        ensure_usable(from, to, coefficient)?;
        self.generic
            .insert((from.code.clone(), to.code.clone()), coefficient);
        Ok(())
    }

    /// Register a conversion that only applies to one product (e.g. pieces per box).
    pub fn register_for_product(
        &mut self,
        product: ProductId,
        from: &Unit,
        to: &Unit,
        coefficient: Decimal,
    ) -> DomainResult<()> {
        ensure_usable(from, to, coefficient)?;
        self.per_product
            .insert((product, (from.code.clone(), to.code.clone())), coefficient);
        Ok(())
    }

    fn lookup(&self, product: ProductId, from: &str, to: &str) -> Option<Coefficient> {
        let key = (from.to_string(), to.to_string());
        if let Some(coef) = self.per_product.get(&(product, key.clone())) {
            return Some(Coefficient::Multiply(*coef));
        }
        let reversed = (to.to_string(), from.to_string());
        if let Some(coef) = self.per_product.get(&(product, reversed.clone())) {
            return Some(Coefficient::Divide(*coef));
        }
        if let Some(coef) = self.generic.get(&key) {
            return Some(Coefficient::Multiply(*coef));
        }
        self.generic.get(&reversed).copied().map(Coefficient::Divide)
    }
}

fn ensure_usable(from: &Unit, to: &Unit, coefficient: Decimal) -> DomainResult<()> {
    if coefficient.is_zero() {
        return Err(DomainError::validation(format!(
            "conversion coefficient from {from} to {to} must not be zero"
        )));
    }
    if from == to {
        return Err(DomainError::validation(format!(
            "conversion from {from} to itself is implicit"
        )));
    }
    Ok(())
}

impl UnitConversion for UnitConversionTable {
    fn convert(
        &self,
        from: &Unit,
        to: &Unit,
        value: Decimal,
        product: &Product,
    ) -> DomainResult<Decimal> {
        if from == to {
            return Ok(value);
        }

        let coefficient = self
            .lookup(product.id, &from.code, &to.code)
            .ok_or_else(|| DomainError::incompatible_units(&from.code, &to.code))?;

        let converted = coefficient
            .apply(value)
            .ok_or_else(DomainError::amount_overflow)?
            .round_dp_with_strategy(self.scale, RoundingStrategy::MidpointNearestEven);

        tracing::trace!(
            product = %product.code,
            from = %from,
            to = %to,
            %value,
            %converted,
            "unit conversion"
        );

        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductType;
    use proptest::prelude::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn piece() -> Unit {
        Unit::new("PCE", "Piece")
    }

    fn dozen() -> Unit {
        Unit::new("DZN", "Dozen")
    }

    fn boxed() -> Unit {
        Unit::new("BOX", "Box")
    }

    fn product() -> Product {
        Product::new("EGG", "Egg", ProductType::Storable)
    }

    fn table() -> UnitConversionTable {
        let mut table = UnitConversionTable::new();
        table.register(&dozen(), &piece(), d("12")).unwrap();
        table
    }

    #[test]
    fn same_unit_is_identity() {
        let converted = table()
            .convert(&piece(), &piece(), d("3.14159265"), &product())
            .unwrap();
        assert_eq!(converted, d("3.14159265"));
    }

    #[test]
    fn direct_entry_multiplies() {
        let converted = table()
            .convert(&dozen(), &piece(), d("2"), &product())
            .unwrap();
        assert_eq!(converted, d("24"));
    }

    #[test]
    fn reverse_entry_divides_and_rounds() {
        let converted = table()
            .convert(&piece(), &dozen(), d("5"), &product())
            .unwrap();
        assert_eq!(converted, d("0.416667"));
    }

    #[test]
    fn unknown_pair_is_incompatible() {
        let err = table()
            .convert(&piece(), &boxed(), d("1"), &product())
            .unwrap_err();
        assert_eq!(err, DomainError::incompatible_units("PCE", "BOX"));
    }

    #[test]
    fn product_specific_entry_wins() {
        let egg = product();
        let mut table = table();
        table.register(&boxed(), &piece(), d("10")).unwrap();
        table
            .register_for_product(egg.id, &boxed(), &piece(), d("30"))
            .unwrap();

        let other = Product::new("NUT", "Nut", ProductType::Storable);
        assert_eq!(table.convert(&boxed(), &piece(), d("1"), &egg).unwrap(), d("30"));
        assert_eq!(table.convert(&boxed(), &piece(), d("1"), &other).unwrap(), d("10"));
    }

    #[test]
    fn zero_coefficient_is_rejected() {
        let mut table = UnitConversionTable::new();
        let err = table.register(&dozen(), &piece(), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn custom_scale_rounds_half_even() {
        let eight = Unit::new("P8", "Pack of 8");
        let mut table = UnitConversionTable::with_scale(2);
        table.register(&eight, &piece(), d("8")).unwrap();

        // 1 / 8 = 0.125 sits on the midpoint.
        let packs = table.convert(&piece(), &eight, d("1"), &product()).unwrap();
        assert_eq!(packs, d("0.12"));
    }

    #[test]
    fn reverse_entry_divides_large_values_exactly() {
        let crate_of_three = Unit::new("T3", "Tray of 3");
        let mut table = UnitConversionTable::new();
        table.register(&crate_of_three, &piece(), d("3")).unwrap();

        let trays = table
            .convert(&piece(), &crate_of_three, d("30000000000000000000000"), &product())
            .unwrap();
        assert_eq!(trays, d("10000000000000000000000"));
    }

    #[test]
    fn conversion_past_decimal_range_is_an_error() {
        let err = table()
            .convert(&dozen(), &piece(), Decimal::MAX, &product())
            .unwrap_err();
        assert_eq!(err, DomainError::amount_overflow());
    }

    fn one_dozen_in_pieces<C: UnitConversion>(conversion: C) -> Decimal {
        conversion
            .convert(&dozen(), &piece(), d("1"), &product())
            .unwrap()
    }

    #[test]
    fn works_through_a_reference() {
        let table = table();
        assert_eq!(one_dozen_in_pieces(&table), d("12"));
        assert_eq!(one_dozen_in_pieces(&table as &dyn UnitConversion), d("12"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: converting whole dozens to pieces and back is lossless.
        #[test]
        fn dozens_round_trip_through_pieces(dozens in 0i64..1_000_000i64) {
            let table = table();
            let egg = product();
            let value = Decimal::from(dozens);

            let pieces = table.convert(&dozen(), &piece(), value, &egg).unwrap();
            prop_assert_eq!(pieces, value * d("12"));

            let back = table.convert(&piece(), &dozen(), pieces, &egg).unwrap();
            prop_assert_eq!(back, value);
        }
    }
}
