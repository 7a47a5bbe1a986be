//! Entity writer port.
//!
//! The mutation endpoints behind the optimistic list updates: create and
//! update return the server's view of the entity, which the caller feeds
//! into the list store's `Insert`/`Replace` operations; delete returns
//! nothing because the caller already knows the id to `Remove`.

use async_trait::async_trait;
use serde::Serialize;

use super::FetchError;

/// Port for entity create/update/delete calls.
///
/// Shares the fetch error taxonomy and the session boundary with the
/// page fetcher. No retries; a failed mutation is reported to the user
/// and the optimistic state is not applied.
#[async_trait]
pub trait EntityWriter<T>: Send + Sync {
    /// The id type entities are addressed by.
    type Id: Send + Sync;

    /// Creates an entity, returning the server-assigned representation.
    async fn create<P: Serialize + Send + Sync>(&self, payload: &P) -> Result<T, FetchError>;

    /// Updates the entity with this id, returning the new representation.
    async fn update<P: Serialize + Send + Sync>(
        &self,
        id: &Self::Id,
        payload: &P,
    ) -> Result<T, FetchError>;

    /// Deletes the entity with this id.
    async fn delete(&self, id: &Self::Id) -> Result<(), FetchError>;
}
