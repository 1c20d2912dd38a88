use async_trait::async_trait;
use domain::{Artist, ArtistRepository, DomainError};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Store {
    rows: BTreeMap<i32, Artist>,
    last_id: i32,
}

/// Process-local artist storage. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryArtistRepository {
    store: RwLock<Store>,
}

impl InMemoryArtistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtistRepository for InMemoryArtistRepository {
    async fn insert(&self, artist: &Artist) -> Result<Artist, DomainError> {
        let mut store = self.store.write().await;
        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| DomainError::RepositoryError("artist id space exhausted".to_string()))?;

        let saved = Artist::with_id(id, artist.name.clone());
        store.rows.insert(id, saved.clone());
        store.last_id = id;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Artist>, DomainError> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Artist>, DomainError> {
        Ok(self.store.read().await.rows.values().cloned().collect())
    }

    async fn upsert(&self, artist: &Artist) -> Result<Artist, DomainError> {
        let id = artist.id.ok_or_else(|| {
            DomainError::ValidationError("Artist ID is required for upsert".to_string())
        })?;

        let mut store = self.store.write().await;
        store.last_id = store.last_id.max(id);
        store.rows.insert(id, artist.clone());
        Ok(artist.clone())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        self.store.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_ids_from_one_and_stores_the_row() {
        let repo = InMemoryArtistRepository::new();
        let beatles = repo
            .insert(&Artist::with_id(9, Some("The Beatles".to_string())))
            .await
            .unwrap();
        let queen = repo.insert(&Artist::new(Some("Queen".to_string()))).await.unwrap();

        assert_eq!(beatles, Artist::with_id(1, Some("The Beatles".to_string())));
        assert_eq!(queen, Artist::with_id(2, Some("Queen".to_string())));
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(beatles.clone()));
        assert_eq!(repo.find_all().await.unwrap(), vec![beatles, queen]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryArtistRepository::new();
        let first = repo.insert(&Artist::new(Some("A".to_string()))).await.unwrap();
        repo.delete_by_id(first.id.unwrap()).await.unwrap();

        let second = repo.insert(&Artist::new(Some("B".to_string()))).await.unwrap();
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn upsert_with_new_id_advances_counter() {
        let repo = InMemoryArtistRepository::new();
        repo.upsert(&Artist::with_id(10, Some("Imported".to_string())))
            .await
            .unwrap();

        let next = repo.insert(&Artist::new(Some("Next".to_string()))).await.unwrap();
        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn upsert_without_id_is_rejected() {
        let repo = InMemoryArtistRepository::new();
        let err = repo.upsert(&Artist::new(None)).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}
