//! HTTP adapters for the list and mutation endpoints.

mod entity_writer;
mod page_fetcher;

pub use entity_writer::HttpEntityWriter;
pub use page_fetcher::{HttpFetcherConfig, HttpPageFetcher, SortOrder};
