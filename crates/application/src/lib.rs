use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::info;

/// Where artist records are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite { database_path: String, pool_size: u32 },
    InMemory,
}

/// Artist Application - wires storage into the artist service
pub struct ArtistApp {
    pub artist_service: ArtistService,
}

impl ArtistApp {
    pub fn new(backend: &StorageBackend) -> Result<Self, DomainError> {
        // Infrastructure layer - pick the repository implementation
        let artist_repository: Arc<dyn ArtistRepository> = match backend {
            StorageBackend::Sqlite {
                database_path,
                pool_size,
            } => {
                let database = Database::new(database_path, *pool_size)?;
                Arc::new(SqliteArtistRepository::new(database.get_pool().clone()))
            }
            StorageBackend::InMemory => Arc::new(InMemoryArtistRepository::new()),
        };
        info!(?backend, "artist storage initialized");

        // Domain services
        let artist_service = ArtistService::new(artist_repository);

        Ok(Self { artist_service })
    }

    pub fn in_memory() -> Self {
        Self {
            artist_service: ArtistService::new(Arc::new(InMemoryArtistRepository::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_app_starts_empty() {
        let app = ArtistApp::in_memory();
        assert!(app.artist_service.get_all_artists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sqlite_backend_round_trips_through_service() {
        let app = ArtistApp::new(&StorageBackend::Sqlite {
            database_path: ":memory:".to_string(),
            pool_size: 4,
        })
        .unwrap();

        let created = app
            .artist_service
            .create_artist(Artist::new(Some("Queen".to_string())))
            .await
            .unwrap();
        assert_eq!(
            app.artist_service.get_artist_by_id(created.id.unwrap()).await.unwrap(),
            created
        );
    }
}
