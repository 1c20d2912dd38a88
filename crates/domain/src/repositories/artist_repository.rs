use crate::entities::Artist;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Storage port for artists.
///
/// Adapters report every backend failure as `DomainError::RepositoryError`.
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Persist a new artist. Any id on the input is ignored; storage assigns one.
    async fn insert(&self, artist: &Artist) -> Result<Artist, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Artist>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Artist>, DomainError>;
    /// Replace the row matching `artist.id`, creating it if missing.
    async fn upsert(&self, artist: &Artist) -> Result<Artist, DomainError>;
    /// Remove the row if present. Absent ids are not an error.
    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError>;
}
