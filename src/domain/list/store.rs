//! List store aggregate.
//!
//! The client-owned accumulation of one rendered list: the items fetched
//! so far, the pagination cursor, and the in-flight/has-more flags. The
//! store has no network awareness; the controller feeds it pages and
//! optimistic mutations.
//!
//! # Invariants
//!
//! - Entity ids are unique within `items`
//! - Item order is arrival order; operations never reorder unaffected items
//! - `next_offset` equals the number of fetched items currently held
//! - `is_fetching` marks at most one outstanding request

use tracing::{debug, warn};

use super::{ListPage, LocalMutation};
use crate::domain::foundation::Identify;

/// Accumulated state of one paginated list.
///
/// All operations are synchronous and atomic with respect to the caller;
/// no intermediate inconsistent state is observable.
#[derive(Debug, Clone)]
pub struct ListStore<T: Identify> {
    items: Vec<T>,
    next_offset: usize,
    has_more: bool,
    is_fetching: bool,
}

impl<T: Identify> Default for ListStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identify> ListStore<T> {
    /// Creates an empty store that assumes more data exists until a
    /// short page proves otherwise.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_offset: 0,
            has_more: true,
            is_fetching: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────

    /// Returns the accumulated items in arrival order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when no items are held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the offset the next page should be requested at.
    pub fn next_offset(&self) -> usize {
        self.next_offset
    }

    /// Returns whether the collection may have more pages.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns whether a page request is currently outstanding.
    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    // ─────────────────────────────────────────────────────────────────
    // Fetch cycle
    // ─────────────────────────────────────────────────────────────────

    /// Marks the start of a page request.
    ///
    /// Returns `false` without changing anything if a request is already
    /// outstanding; the single-flight guard for pagination.
    pub fn begin_fetch(&mut self) -> bool {
        if self.is_fetching {
            return false;
        }
        self.is_fetching = true;
        true
    }

    /// Clears the in-flight flag after a request resolves either way.
    pub fn end_fetch(&mut self) {
        self.is_fetching = false;
    }

    /// Appends a fetched page to the end of the list.
    ///
    /// Items whose id is already present (or duplicated within the page)
    /// are dropped, keeping the first occurrence, so a retried request
    /// after an ambiguous timeout cannot double-append. `next_offset`
    /// advances by the count actually appended, which keeps it equal to
    /// the number of fetched items held even when duplicates are dropped.
    /// `has_more` flips to `false` exactly when the page is short.
    ///
    /// Returns the number of items appended.
    pub fn append_page(&mut self, page: ListPage<T>) -> usize {
        let short = page.is_short();
        let returned = page.returned_count();
        let mut appended = 0;

        for item in page.into_items() {
            if self.contains(item.entity_id()) {
                warn!(id = ?item.entity_id(), "dropping duplicate item on append");
                continue;
            }
            self.items.push(item);
            appended += 1;
        }

        self.next_offset += appended;
        self.has_more = !short;
        debug!(
            returned,
            appended,
            total = self.items.len(),
            has_more = self.has_more,
            "appended page"
        );
        appended
    }

    // ─────────────────────────────────────────────────────────────────
    // Local mutations
    // ─────────────────────────────────────────────────────────────────

    /// Applies an optimistic mutation.
    pub fn apply(&mut self, mutation: LocalMutation<T>) {
        match mutation {
            LocalMutation::Insert(item) => self.prepend(item),
            LocalMutation::Replace(item) => self.replace(item),
            LocalMutation::Remove(id) => self.remove(&id),
        }
    }

    /// Inserts a newly created entity at index 0 (newest-first lists).
    ///
    /// Skipped with a warning if the id already exists; a duplicate
    /// insert means the entity already arrived through a fetch or a
    /// second tab.
    pub fn prepend(&mut self, item: T) {
        if self.contains(item.entity_id()) {
            warn!(id = ?item.entity_id(), "skipping prepend of existing id");
            return;
        }
        self.items.insert(0, item);
    }

    /// Substitutes the item with the same id in place, preserving its
    /// position.
    ///
    /// A missing id is a reconciliation warning, not an error: the most
    /// likely cause is a second tab or a prior refresh racing the
    /// optimistic update, so the list is treated as already consistent.
    pub fn replace(&mut self, item: T) {
        match self.position(item.entity_id()) {
            Some(index) => self.items[index] = item,
            None => {
                warn!(id = ?item.entity_id(), "replace target not found; list already consistent");
            }
        }
    }

    /// Deletes the item with this id; silent no-op when absent.
    pub fn remove(&mut self, id: &T::Id) {
        if let Some(index) = self.position(id) {
            self.items.remove(index);
        }
    }

    fn contains(&self, id: &T::Id) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.entity_id() == id)
    }
}
