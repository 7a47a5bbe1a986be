//! HTTP Page Fetcher - Implementation of PageFetcher against REST list endpoints.
//!
//! Performs `GET <base>/<resource>?skip={offset}&limit={count}` with an
//! optional sort parameter pair, attaches the session's bearer credential,
//! and normalizes the backend's two observed response shapes (a bare JSON
//! array and an `{ "items": [...], "total": n }` envelope) into a uniform
//! `ListPage<T>`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpFetcherConfig::new("https://api.example.com", "bookings")
//!     .with_order("created_at", SortOrder::Descending)
//!     .with_timeout(Duration::from_secs(30));
//!
//! let fetcher = HttpPageFetcher::new(config, session);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::domain::list::ListPage;
use crate::ports::{FetchError, PageFetcher, PageRequest, SessionContext};

/// Sort direction for endpoints that accept `order_by`/`order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns the query-parameter value for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Configuration for an HTTP page fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Base URL of the backend (e.g. "https://api.example.com").
    pub base_url: String,
    /// Resource path of the list endpoint (e.g. "bookings").
    pub resource: String,
    /// Optional `order_by` column and `order` direction.
    pub order: Option<(String, SortOrder)>,
    /// Bounded wait per request.
    pub timeout: Duration,
}

impl HttpFetcherConfig {
    /// Creates a configuration for one list endpoint.
    pub fn new(base_url: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            resource: resource.into(),
            order: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the sort column and direction query parameters.
    pub fn with_order(mut self, order_by: impl Into<String>, order: SortOrder) -> Self {
        self.order = Some((order_by.into(), order));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the list endpoint URL.
    fn list_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.resource)
    }
}

/// The two response shapes observed across the backend's list endpoints.
///
/// `Envelope` must come first so an object body is never mistaken for a
/// bare array by the untagged deserializer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Envelope {
        items: Vec<T>,
        #[serde(default)]
        #[allow(dead_code)]
        total: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<T> ListBody<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Envelope { items, .. } => items,
            ListBody::Bare(items) => items,
        }
    }
}

/// HTTP implementation of the page fetcher port.
pub struct HttpPageFetcher<T> {
    config: HttpFetcherConfig,
    client: Client,
    session: Arc<dyn SessionContext>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpPageFetcher<T> {
    /// Creates a fetcher for the configured list endpoint.
    pub fn new(config: HttpFetcherConfig, session: Arc<dyn SessionContext>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            session,
            _marker: PhantomData,
        }
    }

    fn map_request_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if err.is_connect() {
            FetchError::transport(format!("Connection failed: {}", err))
        } else {
            FetchError::transport(err.to_string())
        }
    }
}

#[async_trait]
impl<T> PageFetcher<T> for HttpPageFetcher<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<ListPage<T>, FetchError> {
        let mut query = vec![
            ("skip".to_string(), request.offset.to_string()),
            ("limit".to_string(), request.limit.to_string()),
        ];
        if let Some((column, direction)) = &self.config.order {
            query.push(("order_by".to_string(), column.clone()));
            query.push(("order".to_string(), direction.as_str().to_string()));
        }

        let mut builder = self.client.get(self.config.list_url()).query(&query);
        if let Some(token) = self.session.bearer_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(FetchError::server(status.as_u16(), detail));
        }

        let body: ListBody<T> = response.json().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    timeout_secs: self.config.timeout.as_secs() as u32,
                }
            } else {
                FetchError::transport(format!("response body could not be decoded: {}", e))
            }
        })?;

        let items = body.into_items();
        if items.len() > request.limit {
            warn!(
                resource = %self.config.resource,
                returned = items.len(),
                limit = request.limit,
                "server returned more items than requested; truncating"
            );
        }
        Ok(ListPage::new(items, request.offset, request.limit))
    }
}
