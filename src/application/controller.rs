//! Reconciliation controller.
//!
//! Orchestrates the page fetcher and the list store in response to
//! reach-end signals and local CRUD actions. One controller instance
//! backs one rendered list and exclusively owns its state.
//!
//! # Phases
//!
//! ```text
//! Idle --[reach-end / initial load]--> Fetching
//! Fetching --[page, more remaining]--> Idle
//! Fetching --[short page]--> Exhausted
//! Fetching --[failure]--> Error --[user retry]--> Fetching
//! ```
//!
//! Fetch errors never corrupt the store; it remains at its last-known-good
//! contents and the outcome carries a retryable error for the UI to
//! surface. Local mutations are legal in every phase and cause no phase
//! transition.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ListSettings;
use crate::domain::foundation::{Identify, StateMachine};
use crate::domain::list::{ListStore, LoadPhase, LocalMutation};
use crate::ports::{FetchError, PageFetcher, PageRequest, SessionObserver};

/// Result of one load attempt, reported as data so errors never throw
/// into the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A page was appended; `exhausted` is true when it was short.
    Loaded {
        /// Items actually appended (after deduplication).
        appended: usize,
        /// Whether this page exhausted the collection.
        exhausted: bool,
    },
    /// No request was issued.
    Skipped(SkipReason),
    /// The fetch failed; the store is untouched and `retry` is available.
    Failed(FetchError),
    /// The response completed after the controller was detached and was
    /// dropped without touching the store.
    Discarded,
}

/// Why a load attempt issued no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A request is already in flight.
    AlreadyFetching,
    /// The collection is exhausted.
    Exhausted,
    /// The last fetch failed; only `retry` may issue the next request.
    RetryRequired,
    /// `retry` was called outside the `Error` phase.
    NothingToRetry,
}

/// Handle for signalling unmount from outside the controller.
///
/// Once detached, a fetch that completes later is discarded instead of
/// mutating a store that no longer backs a rendered list.
#[derive(Debug, Clone)]
pub struct DetachHandle {
    detached: Arc<AtomicBool>,
}

impl DetachHandle {
    /// Marks the owning controller as detached.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }
}

/// Controller for one paginated list.
pub struct ListController<T: Identify> {
    store: ListStore<T>,
    fetcher: Arc<dyn PageFetcher<T>>,
    session_observer: Option<Arc<dyn SessionObserver>>,
    page_size: usize,
    phase: LoadPhase,
    failed_request: Option<PageRequest>,
    last_error: Option<FetchError>,
    detached: Arc<AtomicBool>,
}

impl<T: Identify> ListController<T> {
    /// Creates an idle controller with an empty store.
    pub fn new(fetcher: Arc<dyn PageFetcher<T>>, settings: &ListSettings) -> Self {
        Self {
            store: ListStore::new(),
            fetcher,
            session_observer: None,
            page_size: settings.page_size,
            phase: LoadPhase::Idle,
            failed_request: None,
            last_error: None,
            detached: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Registers the central handler for authentication rejections.
    pub fn with_session_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.session_observer = Some(observer);
        self
    }

    /// Eagerly loads the first page, matching the observed mount
    /// behavior. The outcome is recorded in the phase and `last_error`;
    /// a failed initial load leaves an empty store with retry available.
    pub async fn mount(mut self) -> Self {
        let outcome = self.load_next_page().await;
        debug!(?outcome, "initial load at mount");
        self
    }

    // ─────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────

    /// Returns the accumulated items in arrival order.
    pub fn items(&self) -> &[T] {
        self.store.items()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &ListStore<T> {
        &self.store
    }

    /// Returns the current pagination phase.
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Returns whether more pages may remain.
    pub fn has_more(&self) -> bool {
        self.store.has_more()
    }

    /// Returns whether a request is in flight.
    pub fn is_fetching(&self) -> bool {
        self.store.is_fetching()
    }

    /// Returns the error of the last failed fetch, if any.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Returns a handle that marks this controller detached at unmount.
    pub fn detach_handle(&self) -> DetachHandle {
        DetachHandle {
            detached: self.detached.clone(),
        }
    }

    /// Marks this controller detached.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    // ─────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────

    /// Issues the next page request, guarded by phase and the
    /// single-flight flag. Offsets are strictly increasing: the request
    /// always starts at the store's `next_offset`.
    pub async fn load_next_page(&mut self) -> LoadOutcome {
        match self.phase {
            LoadPhase::Fetching => return LoadOutcome::Skipped(SkipReason::AlreadyFetching),
            LoadPhase::Exhausted => return LoadOutcome::Skipped(SkipReason::Exhausted),
            LoadPhase::Error => return LoadOutcome::Skipped(SkipReason::RetryRequired),
            LoadPhase::Idle => {}
        }
        let request = PageRequest::new(self.store.next_offset(), self.page_size);
        self.run_fetch(request).await
    }

    /// Re-issues the identical request that last failed.
    ///
    /// Legal only in the `Error` phase; retry is user-initiated, there is
    /// no automatic backoff.
    pub async fn retry(&mut self) -> LoadOutcome {
        if self.phase != LoadPhase::Error {
            return LoadOutcome::Skipped(SkipReason::NothingToRetry);
        }
        let Some(request) = self.failed_request else {
            return LoadOutcome::Skipped(SkipReason::NothingToRetry);
        };
        self.run_fetch(request).await
    }

    /// Background full refresh for eventual consistency.
    ///
    /// Refetches the first page and replaces the store contents wholesale
    /// on success, re-arming pagination from the new state. On failure the
    /// store and phase are restored untouched; a best-effort refresh never
    /// degrades a healthy list.
    ///
    /// Refresh sits outside the pagination lifecycle: it may leave the
    /// `Exhausted` phase, which pagination itself never does. While the
    /// request is in flight the phase reports `Fetching`, in agreement
    /// with `is_fetching()`.
    pub async fn refresh(&mut self) -> LoadOutcome {
        if !self.store.begin_fetch() {
            return LoadOutcome::Skipped(SkipReason::AlreadyFetching);
        }
        let prior = self.phase;
        self.phase = LoadPhase::Fetching;
        let request = PageRequest::new(0, self.page_size);
        let result = self.fetcher.fetch_page(request).await;

        if self.is_detached() {
            self.store.end_fetch();
            self.phase = prior;
            debug!("discarding refresh completed after detach");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                let mut fresh = ListStore::new();
                let appended = fresh.append_page(page);
                self.store = fresh;
                self.phase = if self.store.has_more() {
                    LoadPhase::Idle
                } else {
                    LoadPhase::Exhausted
                };
                self.failed_request = None;
                self.last_error = None;
                LoadOutcome::Loaded {
                    appended,
                    exhausted: self.phase.is_exhausted(),
                }
            }
            Err(error) => {
                self.store.end_fetch();
                self.phase = prior;
                self.notify_if_auth_rejected(&error);
                warn!(%error, "background refresh failed; keeping current contents");
                LoadOutcome::Failed(error)
            }
        }
    }

    async fn run_fetch(&mut self, request: PageRequest) -> LoadOutcome {
        if !self.store.begin_fetch() {
            return LoadOutcome::Skipped(SkipReason::AlreadyFetching);
        }
        self.phase = match self.phase.transition_to(LoadPhase::Fetching) {
            Ok(next) => next,
            Err(invalid) => {
                self.store.end_fetch();
                warn!(%invalid, "refused fetch");
                return LoadOutcome::Skipped(SkipReason::AlreadyFetching);
            }
        };

        let result = self.fetcher.fetch_page(request).await;

        if self.is_detached() {
            self.store.end_fetch();
            self.phase = LoadPhase::Idle;
            debug!(offset = request.offset, "discarding page completed after detach");
            return LoadOutcome::Discarded;
        }
        self.store.end_fetch();

        match result {
            Ok(page) => {
                let appended = self.store.append_page(page);
                self.failed_request = None;
                self.last_error = None;
                self.phase = if self.store.has_more() {
                    LoadPhase::Idle
                } else {
                    LoadPhase::Exhausted
                };
                LoadOutcome::Loaded {
                    appended,
                    exhausted: self.phase.is_exhausted(),
                }
            }
            Err(error) => {
                self.notify_if_auth_rejected(&error);
                self.failed_request = Some(request);
                self.last_error = Some(error.clone());
                self.phase = LoadPhase::Error;
                LoadOutcome::Failed(error)
            }
        }
    }

    fn notify_if_auth_rejected(&self, error: &FetchError) {
        if error.is_auth_rejection() {
            if let Some(observer) = &self.session_observer {
                observer.on_auth_rejected();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Local mutations
    // ─────────────────────────────────────────────────────────────────

    /// Applies an optimistic mutation; legal in every phase, no phase
    /// transition.
    pub fn apply(&mut self, mutation: LocalMutation<T>) {
        self.store.apply(mutation);
    }

    /// Prepends a newly created entity.
    pub fn insert(&mut self, item: T) {
        self.store.prepend(item);
    }

    /// Substitutes the entity with the same id in place.
    pub fn replace(&mut self, item: T) {
        self.store.replace(item);
    }

    /// Deletes the entity with this id.
    pub fn remove(&mut self, id: &T::Id) {
        self.store.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MockPageFetcher;
    use crate::domain::foundation::Identify;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
    }

    impl Identify for Row {
        type Id = u32;

        fn entity_id(&self) -> &u32 {
            &self.id
        }
    }

    fn rows(ids: std::ops::Range<u32>) -> Vec<Row> {
        ids.map(|id| Row { id }).collect()
    }

    fn controller(fetcher: MockPageFetcher<Row>) -> ListController<Row> {
        ListController::new(Arc::new(fetcher), &ListSettings::default())
    }

    #[tokio::test]
    async fn full_page_leaves_idle_with_more() {
        let mut c = controller(MockPageFetcher::new().with_page(rows(0..20)));
        let outcome = c.load_next_page().await;
        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                appended: 20,
                exhausted: false
            }
        );
        assert_eq!(c.phase(), LoadPhase::Idle);
        assert!(c.has_more());
    }

    #[tokio::test]
    async fn short_page_exhausts() {
        let mut c = controller(MockPageFetcher::new().with_page(rows(0..5)));
        let outcome = c.load_next_page().await;
        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                appended: 5,
                exhausted: true
            }
        );
        assert_eq!(c.phase(), LoadPhase::Exhausted);
        assert_eq!(
            c.load_next_page().await,
            LoadOutcome::Skipped(SkipReason::Exhausted)
        );
    }

    #[tokio::test]
    async fn error_phase_requires_explicit_retry() {
        let mut c = controller(
            MockPageFetcher::new()
                .with_error(FetchError::transport("down"))
                .with_page(rows(0..3)),
        );
        let outcome = c.load_next_page().await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(c.phase(), LoadPhase::Error);
        assert!(c.items().is_empty());
        assert_eq!(
            c.load_next_page().await,
            LoadOutcome::Skipped(SkipReason::RetryRequired)
        );

        let retried = c.retry().await;
        assert_eq!(
            retried,
            LoadOutcome::Loaded {
                appended: 3,
                exhausted: true
            }
        );
        assert!(c.last_error().is_none());
    }

    #[tokio::test]
    async fn retry_outside_error_phase_is_skipped() {
        let mut c = controller(MockPageFetcher::new().with_page(rows(0..20)));
        assert_eq!(
            c.retry().await,
            LoadOutcome::Skipped(SkipReason::NothingToRetry)
        );
    }

    #[tokio::test]
    async fn mutations_are_legal_in_error_phase() {
        let mut c = controller(MockPageFetcher::new().with_error(FetchError::transport("down")));
        let _ = c.load_next_page().await;
        c.insert(Row { id: 1 });
        assert_eq!(c.items(), &[Row { id: 1 }]);
        assert_eq!(c.phase(), LoadPhase::Error);
    }

    #[tokio::test]
    async fn refresh_rearms_pagination_from_exhausted() {
        let mut c = controller(
            MockPageFetcher::new()
                .with_page(rows(0..5))
                .with_page(rows(0..20)),
        );
        let _ = c.load_next_page().await;
        assert_eq!(c.phase(), LoadPhase::Exhausted);

        let outcome = c.refresh().await;
        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                appended: 20,
                exhausted: false
            }
        );
        assert_eq!(c.phase(), LoadPhase::Idle);
        assert!(c.has_more());
        assert!(!c.is_fetching());
    }

    #[tokio::test]
    async fn failed_refresh_restores_error_phase_and_retry() {
        let mut c = controller(
            MockPageFetcher::new()
                .with_error(FetchError::transport("down"))
                .with_error(FetchError::transport("still down"))
                .with_page(rows(0..3)),
        );
        let _ = c.load_next_page().await;
        assert_eq!(c.phase(), LoadPhase::Error);

        let outcome = c.refresh().await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(c.phase(), LoadPhase::Error);
        assert!(!c.is_fetching());

        // the original failed request is still retryable
        let retried = c.retry().await;
        assert!(matches!(retried, LoadOutcome::Loaded { appended: 3, .. }));
    }

    #[tokio::test]
    async fn detached_controller_discards_late_page() {
        let mut c = controller(MockPageFetcher::new().with_page(rows(0..20)));
        c.detach();
        let outcome = c.load_next_page().await;
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(c.items().is_empty());
    }
}
