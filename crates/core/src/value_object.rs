//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attributes. Copying
/// one into another aggregate produces an independent value; mutating the copy
/// never affects the original.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
