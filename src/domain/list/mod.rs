//! List domain - pages, the accumulated list state, and its mutations.
//!
//! # Module Organization
//!
//! - `page` - `ListPage<T>`, one bounded response from a list endpoint
//! - `store` - `ListStore<T>`, the client-owned accumulation
//! - `mutation` - `LocalMutation<T>`, optimistic edits applied outside the
//!   fetch cycle
//! - `phase` - `LoadPhase`, the pagination lifecycle state machine

mod mutation;
mod page;
mod phase;
mod store;

pub use mutation::LocalMutation;
pub use page::ListPage;
pub use phase::LoadPhase;
pub use store::ListStore;
