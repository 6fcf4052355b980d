//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Implemented by every persisted record so stores can key them generically.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
