//! In-memory session adapters for testing.

use secrecy::Secret;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ports::{SessionContext, SessionObserver};

/// Session context holding a fixed credential (or none).
#[derive(Debug, Clone)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    /// Creates a session with a fixed bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Creates an unauthenticated session.
    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

impl SessionContext for StaticSession {
    fn bearer_token(&self) -> Option<Secret<String>> {
        self.token.clone().map(Secret::new)
    }
}

/// Session observer that counts auth rejections for verification.
#[derive(Debug, Default)]
pub struct RecordingSessionObserver {
    rejections: AtomicUsize,
}

impl RecordingSessionObserver {
    /// Creates an observer with zero recorded rejections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times the session was rejected.
    pub fn rejection_count(&self) -> usize {
        self.rejections.load(Ordering::SeqCst)
    }
}

impl SessionObserver for RecordingSessionObserver {
    fn on_auth_rejected(&self) {
        self.rejections.fetch_add(1, Ordering::SeqCst);
    }
}
