//! Mock Page Fetcher for testing.
//!
//! Provides a configurable mock implementation of the PageFetcher port,
//! allowing controller tests to run without a real backend.
//!
//! # Features
//!
//! - Pre-configured pages consumed in order
//! - Simulated delays for timeout/interleaving testing
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let fetcher = MockPageFetcher::new()
//!     .with_page(rows(0..20))
//!     .with_error(FetchError::Timeout { timeout_secs: 30 });
//!
//! let page = fetcher.fetch_page(PageRequest::new(0, 20)).await?;
//! assert_eq!(fetcher.calls(), vec![PageRequest::new(0, 20)]);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::list::ListPage;
use crate::ports::{FetchError, PageFetcher, PageRequest};

/// Mock page fetcher for testing.
///
/// Responses are consumed front to back; an exhausted queue yields an
/// empty page, which reads as exhaustion to the store.
#[derive(Debug, Clone)]
pub struct MockPageFetcher<T> {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<Vec<T>, FetchError>>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<PageRequest>>>,
}

impl<T> Default for MockPageFetcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MockPageFetcher<T> {
    /// Creates a new mock fetcher with no scripted responses.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful page of items.
    pub fn with_page(self, items: Vec<T>) -> Self {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(Ok(items));
        self
    }

    /// Queues a fetch failure.
    pub fn with_error(self, error: FetchError) -> Self {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(Err(error));
        self
    }

    /// Sets a simulated latency applied before each response.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the requests made so far.
    pub fn calls(&self) -> Vec<PageRequest> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Returns the number of requests made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }
}

#[async_trait]
impl<T> PageFetcher<T> for MockPageFetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<ListPage<T>, FetchError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(request);

        if self.delay > Duration::ZERO {
            sleep(self.delay).await;
        }

        let scripted = self
            .responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front();

        match scripted {
            Some(Ok(items)) => Ok(ListPage::new(items, request.offset, request.limit)),
            Some(Err(error)) => Err(error),
            None => Ok(ListPage::new(Vec::new(), request.offset, request.limit)),
        }
    }
}
