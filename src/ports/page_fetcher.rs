//! Page fetcher port.
//!
//! One invocation performs exactly one network call against a list
//! endpoint and normalizes the result into a `ListPage<T>`, whatever
//! shape the backend chose to respond with.

use async_trait::async_trait;

use crate::domain::list::ListPage;

/// Parameters of one page request.
///
/// Pages are requested in strictly increasing offset order; the offset
/// is the number of items to skip before the returned page begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Items to skip before the page begins.
    pub offset: usize,
    /// Maximum number of items to return. Must be positive.
    pub limit: usize,
}

impl PageRequest {
    /// Creates a request for the page starting at `offset`.
    ///
    /// A zero limit is clamped to 1: a zero-limit request could never
    /// return a short page, so exhaustion would never be observed.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: limit.max(1),
        }
    }
}

/// Maximum response-body length carried into a `Server` error detail.
const MAX_ERROR_DETAIL_LEN: usize = 256;

/// Errors a page fetch (or entity mutation) can fail with.
///
/// The taxonomy is deliberately small: either no usable response was
/// reached, the bounded wait was exceeded, or the server answered with
/// a failure status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No usable response reached the client (connection failure,
    /// undecodable body).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The bounded wait for a response was exceeded.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// The timeout bound that was exceeded.
        timeout_secs: u32,
    },

    /// The server responded with a failure status.
    #[error("server error {status}: {detail}")]
    Server {
        /// HTTP status code (4xx/5xx).
        status: u16,
        /// Response detail, truncated for logging.
        detail: String,
    },
}

impl FetchError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport(message.into())
    }

    /// Creates a server error, truncating the detail to a bounded length.
    ///
    /// The cut lands on a char boundary so a multi-byte body (an HTML
    /// error page with typographic quotes, say) cannot panic the error
    /// path.
    pub fn server(status: u16, detail: impl Into<String>) -> Self {
        let mut detail = detail.into();
        if detail.len() > MAX_ERROR_DETAIL_LEN {
            let mut cut = MAX_ERROR_DETAIL_LEN;
            while !detail.is_char_boundary(cut) {
                cut -= 1;
            }
            detail.truncate(cut);
        }
        FetchError::Server { status, detail }
    }

    /// Returns true when the server rejected the request's credential.
    ///
    /// Session invalidation on rejection is the caller's job, handled
    /// once centrally, never per list.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, FetchError::Server { status: 401, .. })
    }
}

/// Port for fetching one page of a list endpoint.
///
/// Implementations attach the session credential, enforce the bounded
/// wait, and normalize the backend's response shape. They perform no
/// retries; retry policy belongs to the caller.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetches the page at `request.offset` with `request.limit` items.
    async fn fetch_page(&self, request: PageRequest) -> Result<ListPage<T>, FetchError>;
}
