//! Invoicing settings collaborator.
//!
//! [`InvoicingConfig`] reads from the environment (or any serde source); hosts
//! with their own settings store implement [`InvoicingSettings`] directly.

use serde::{Deserialize, Serialize};

/// Environment variable enabling per-line invoiced amount tracking.
pub const MANAGE_INVOICED_AMOUNT_BY_LINE_ENV: &str = "SUPPLYLINE_MANAGE_INVOICED_AMOUNT_BY_LINE";
/// Environment variable holding the number of decimals on unit prices.
pub const UNIT_PRICE_DECIMALS_ENV: &str = "SUPPLYLINE_UNIT_PRICE_DECIMALS";

/// Default number of decimals on unit prices.
pub const DEFAULT_UNIT_PRICE_DECIMALS: u32 = 2;

/// Settings consulted while deriving invoice lines.
pub trait InvoicingSettings {
    /// Invoice lines keep links to the order lines and stock moves they invoice.
    fn manage_invoiced_amount_by_line(&self) -> bool;
}

impl<T: InvoicingSettings + ?Sized> InvoicingSettings for &T {
    fn manage_invoiced_amount_by_line(&self) -> bool {
        (**self).manage_invoiced_amount_by_line()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoicingConfig {
    pub manage_invoiced_amount_by_line: bool,
    pub nb_decimal_digit_for_unit_price: u32,
}

impl Default for InvoicingConfig {
    fn default() -> Self {
        Self {
            manage_invoiced_amount_by_line: false,
            nb_decimal_digit_for_unit_price: DEFAULT_UNIT_PRICE_DECIMALS,
        }
    }
}

impl InvoicingConfig {
    /// Load from process environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (environment, test map...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let manage_invoiced_amount_by_line = match lookup(MANAGE_INVOICED_AMOUNT_BY_LINE_ENV) {
            None => defaults.manage_invoiced_amount_by_line,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    key = MANAGE_INVOICED_AMOUNT_BY_LINE_ENV,
                    value = %raw,
                    "unrecognized boolean; using default"
                );
                defaults.manage_invoiced_amount_by_line
            }),
        };

        let nb_decimal_digit_for_unit_price = match lookup(UNIT_PRICE_DECIMALS_ENV) {
            None => defaults.nb_decimal_digit_for_unit_price,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n <= 10 => n,
                _ => {
                    tracing::warn!(
                        key = UNIT_PRICE_DECIMALS_ENV,
                        value = %raw,
                        "expected a number of decimals between 0 and 10; using default"
                    );
                    defaults.nb_decimal_digit_for_unit_price
                }
            },
        };

        Self {
            manage_invoiced_amount_by_line,
            nb_decimal_digit_for_unit_price,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl InvoicingSettings for InvoicingConfig {
    fn manage_invoiced_amount_by_line(&self) -> bool {
        self.manage_invoiced_amount_by_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        assert_eq!(InvoicingConfig::from_lookup(|_| None), InvoicingConfig::default());
    }

    #[test]
    fn reads_flag_and_decimals() {
        let config = InvoicingConfig::from_lookup(lookup(&[
            (MANAGE_INVOICED_AMOUNT_BY_LINE_ENV, "Yes"),
            (UNIT_PRICE_DECIMALS_ENV, "4"),
        ]));
        assert!(config.manage_invoiced_amount_by_line());
        assert_eq!(config.nb_decimal_digit_for_unit_price, 4);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = InvoicingConfig::from_lookup(lookup(&[
            (MANAGE_INVOICED_AMOUNT_BY_LINE_ENV, "maybe"),
            (UNIT_PRICE_DECIMALS_ENV, "-3"),
        ]));
        assert_eq!(config, InvoicingConfig::default());
    }

    #[test]
    fn from_env_reads_process_environment() {
        let expected = InvoicingConfig::from_lookup(|key| std::env::var(key).ok());
        assert_eq!(InvoicingConfig::from_env(), expected);
    }

    #[test]
    fn deserializes_partial_json() {
        let config: InvoicingConfig =
            serde_json::from_str(r#"{ "manage_invoiced_amount_by_line": true }"#).unwrap();
        assert!(config.manage_invoiced_amount_by_line);
        assert_eq!(config.nb_decimal_digit_for_unit_price, DEFAULT_UNIT_PRICE_DECIMALS);
    }
}
