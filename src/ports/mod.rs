//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the list domain and the outside world. Adapters implement these ports.
//!
//! - `PageFetcher` - one normalized network call per page of a list endpoint
//! - `EntityWriter` - create/update/delete mutation endpoints
//! - `SessionContext` - injected bearer credential (never read from a global)
//! - `SessionObserver` - central handler for authentication rejections

mod entity_writer;
mod page_fetcher;
mod session;

pub use entity_writer::EntityWriter;
pub use page_fetcher::{FetchError, PageFetcher, PageRequest};
pub use session::{SessionContext, SessionObserver};
