//! Session boundary ports.
//!
//! The bearer credential is an injected dependency rather than a read
//! from ambient/global storage, so fetchers and controllers are testable
//! without a browser-storage shim. Authentication rejection is a
//! cross-cutting signal handled once, centrally, by a single observer,
//! never duplicated per list.

use secrecy::Secret;

/// Port providing the ambient session's bearer credential.
///
/// Returning `None` means the request goes out unauthenticated (public
/// guest-facing endpoints allow this).
pub trait SessionContext: Send + Sync {
    /// Returns the current bearer token, if a session exists.
    fn bearer_token(&self) -> Option<Secret<String>>;
}

/// Port notified when a request's credential is rejected.
///
/// The fetcher's caller invokes this exactly once per rejected request;
/// the implementation owns session invalidation and redirect.
pub trait SessionObserver: Send + Sync {
    /// Called when the server rejected the session credential.
    fn on_auth_rejected(&self);
}
