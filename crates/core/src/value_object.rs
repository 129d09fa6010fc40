//! Value object trait: equality by value, not identity.
//!
//! Units of measure are value objects: they are defined entirely by their
//! attribute values.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Unit {
///     code: String,
/// }
///
/// impl ValueObject for Unit {}
///
/// let a = Unit { code: "KG".to_string() };
/// let b = Unit { code: "KG".to_string() };
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
