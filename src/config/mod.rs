//! Configuration for list loading.

mod error;
mod list;

pub use error::ValidationError;
pub use list::ListSettings;
