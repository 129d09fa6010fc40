//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Collaborator failures (unit conversion, pricing lookup) surface here and are
/// propagated to the caller unchanged. Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// No conversion is known between two units for the given product.
    #[error("no unit conversion from `{from}` to `{to}`")]
    IncompatibleUnits { from: String, to: String },

    /// Pricing data required to value a line is missing.
    #[error("missing price: {0}")]
    MissingPrice(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn incompatible_units(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::IncompatibleUnits {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn missing_price(msg: impl Into<String>) -> Self {
        Self::MissingPrice(msg.into())
    }

    /// Decimal arithmetic left the representable range.
    pub fn amount_overflow() -> Self {
        Self::Validation("amount overflow".to_string())
    }
}
