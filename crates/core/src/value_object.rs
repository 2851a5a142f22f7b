//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Every snapshot a
/// configuration provider hands to the resolver is one: the resolver reads it and
/// drops it, it never mutates it.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Threshold(f64);
///
/// impl ValueObject for Threshold {}
///
/// assert_eq!(Threshold(1.5), Threshold(1.5));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
