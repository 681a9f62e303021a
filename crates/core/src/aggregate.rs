//! Aggregate root trait shared by items and carts.

/// Aggregate root marker + minimal interface.
///
/// Both stores treat a single record as their unit of consistency; the version
/// lets callers (and tests) observe whether an operation actually changed state.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Starts at 1 on creation and grows by one per effective mutation.
    /// No-op operations (an empty patch, a repeated delete) leave it unchanged.
    fn version(&self) -> u64;
}
