//! Aggregate root trait for domain models persisted through a repository.

/// Aggregate root marker + minimal interface.
///
/// All consistency rules for an aggregate and the entities it owns are
/// enforced through the root; repositories load and store whole roots.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;
}
