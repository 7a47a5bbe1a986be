//! In-memory adapters for testing.

mod mock_fetcher;
mod session;

pub use mock_fetcher::MockPageFetcher;
pub use session::{RecordingSessionObserver, StaticSession};
