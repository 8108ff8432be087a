//! Records with a stable identity.

/// A record that keeps its identity while its attributes change.
///
/// Stored customer records are entities; cart-scoped address copies are values
/// (see [`crate::ValueObject`]).
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Same record, possibly in different states.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
