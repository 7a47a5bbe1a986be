//! Domain layer - pure list state with no network awareness.

pub mod foundation;
pub mod list;
