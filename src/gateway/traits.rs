use crate::error::FavoritesResult;
use crate::gateway::types::RemoteFavorite;
use crate::models::Property;
use async_trait::async_trait;

/// Remote persistence for a user's favorites, keyed by email.
///
/// One round trip per call. Implementations don't retry.
#[async_trait]
pub trait FavoritesGateway: Send + Sync {
    /// Every favorite stored for `email`
    async fn list(&self, email: &str) -> FavoritesResult<Vec<RemoteFavorite>>;

    /// Store `property` as a favorite of `email`
    async fn add(&self, email: &str, property_id: &str, property: &Property) -> FavoritesResult<()>;

    /// Delete a favorite. Deleting one that doesn't exist succeeds.
    async fn remove(&self, email: &str, property_id: &str) -> FavoritesResult<()>;
}
