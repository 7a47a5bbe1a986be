//! List page value object.
//!
//! One bounded-size response from a list endpoint, together with the
//! offset and limit it was requested with. The page carries everything
//! the store needs to decide whether the collection is exhausted.

/// One page of items returned by a list endpoint.
///
/// # Invariants
///
/// - `items.len() <= requested_limit` (enforced at construction; excess
///   is truncated by the fetcher boundary before the page is built)
/// - `requested_limit > 0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage<T> {
    items: Vec<T>,
    requested_offset: usize,
    requested_limit: usize,
}

impl<T> ListPage<T> {
    /// Creates a page from a server response.
    ///
    /// Items beyond `requested_limit` are dropped; a well-behaved server
    /// never sends them, so callers that care should log before truncating.
    /// A zero limit is clamped to 1, since a zero-limit page could never
    /// be short and exhaustion would never be observed.
    pub fn new(mut items: Vec<T>, requested_offset: usize, requested_limit: usize) -> Self {
        let requested_limit = requested_limit.max(1);
        items.truncate(requested_limit);
        Self {
            items,
            requested_offset,
            requested_limit,
        }
    }

    /// Returns the items in server-assigned order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, yielding its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the offset this page was requested at.
    pub fn requested_offset(&self) -> usize {
        self.requested_offset
    }

    /// Returns the limit this page was requested with.
    pub fn requested_limit(&self) -> usize {
        self.requested_limit
    }

    /// Returns the number of items the server actually returned.
    pub fn returned_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the page is short, i.e. the server returned
    /// fewer items than requested.
    ///
    /// A short page is the exhaustion signal: the collection has no more
    /// items past this page. The heuristic under-detects when the true
    /// remaining count is an exact multiple of the limit; in that case the
    /// last full page looks like there is more, and one extra fetch
    /// returning an empty page is needed to observe exhaustion.
    pub fn is_short(&self) -> bool {
        self.items.len() < self.requested_limit
    }
}
