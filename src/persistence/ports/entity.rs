//! Contract implemented by every persisted entity.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Storage-assigned integer identifier.
///
/// Keys are minted by the backend when an insert is committed; callers never
/// choose them.
pub trait SurrogateKey: Copy + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// Wraps a raw storage key.
    fn from_raw(raw: i64) -> Self;
}

/// A record type that can be stored behind a [`super::Repository`].
///
/// An entity is split into an identifier, assigned by storage, and a
/// [`Entity::Draft`] holding every other field. Listing queries use the
/// entity's [`Entity::Filter`], an explicit conjunction of optional
/// conditions.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Identifier type.
    type Id: SurrogateKey;

    /// Field values of an entity that has not been assigned an identifier.
    type Draft: Clone + Debug + Send + Sync + 'static;

    /// Filter options accepted by [`super::Repository::find`].
    ///
    /// The default value matches every entity.
    type Filter: Clone + Debug + Default + Send + Sync + 'static;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Builds the persisted entity once storage has assigned `id`.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    /// Evaluates `filter` against this entity.
    ///
    /// Backends that cannot push filters down to storage use this to select
    /// matching rows.
    fn matches(&self, filter: &Self::Filter) -> bool;
}
