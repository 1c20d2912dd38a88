use crate::entities::Artist;
use crate::errors::DomainError;
use crate::repositories::ArtistRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Artist Service - CRUD policy on top of the storage port
///
/// Holds no state of its own between calls. Storage failures are returned
/// as-is; the only error this service produces is `ArtistNotFound`.
pub struct ArtistService {
    artist_repository: Arc<dyn ArtistRepository>,
}

impl ArtistService {
    pub fn new(artist_repository: Arc<dyn ArtistRepository>) -> Self {
        Self { artist_repository }
    }

    /// Get all artists in storage order
    pub async fn get_all_artists(&self) -> Result<Vec<Artist>, DomainError> {
        let artists = self.artist_repository.find_all().await?;
        debug!(count = artists.len(), "listed artists");
        Ok(artists)
    }

    /// Get artist by ID
    pub async fn get_artist_by_id(&self, id: i32) -> Result<Artist, DomainError> {
        let found = self.artist_repository.find_by_id(id).await?;
        debug!(id, found = found.is_some(), "looked up artist");

        found.ok_or(DomainError::ArtistNotFound(id))
    }

    /// Create a new artist. The incoming id is discarded; storage assigns one.
    pub async fn create_artist(&self, artist: Artist) -> Result<Artist, DomainError> {
        let saved = self
            .artist_repository
            .insert(&Artist::new(artist.name))
            .await?;
        info!(id = ?saved.id, "created artist");
        Ok(saved)
    }

    /// Replace the name of an existing artist, keeping its id.
    ///
    /// Never creates a record. The lookup and the write are two separate
    /// storage calls, so concurrent updates of one id are last-write-wins.
    pub async fn update_artist(&self, id: i32, patch: Artist) -> Result<Artist, DomainError> {
        let existing = self.get_artist_by_id(id).await?;

        let updated = Artist {
            id: existing.id,
            name: patch.name,
        };

        let saved = self.artist_repository.upsert(&updated).await?;
        info!(id, "updated artist");
        Ok(saved)
    }

    /// Delete artist. Deleting an unknown id succeeds.
    pub async fn delete_artist(&self, id: i32) -> Result<(), DomainError> {
        self.artist_repository.delete_by_id(id).await?;
        info!(id, "deleted artist");
        Ok(())
    }
}
