//! Local mutation records.
//!
//! Optimistic edits applied to the list state outside the fetch cycle,
//! so the list reflects the user's own action immediately instead of
//! waiting for a full refetch.

use crate::domain::foundation::Identify;

/// An optimistic edit to apply to a list store.
///
/// Mutations are legal in every pagination phase and never cause a
/// phase transition; they only touch the accumulated items.
#[derive(Debug, Clone)]
pub enum LocalMutation<T: Identify> {
    /// Prepend a newly created entity (newest-first lists).
    Insert(T),
    /// Substitute the entity with the same id in place.
    Replace(T),
    /// Delete the entity with this id.
    Remove(T::Id),
}
