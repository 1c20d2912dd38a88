use crate::database::{artists, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{Artist, ArtistRepository, DomainError};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ArtistModel {
    artist_id: i32,
    name: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = artists)]
struct NewArtistModel {
    name: Option<String>,
}

impl From<ArtistModel> for Artist {
    fn from(model: ArtistModel) -> Self {
        Artist::with_id(model.artist_id, model.name)
    }
}

impl From<&Artist> for NewArtistModel {
    fn from(artist: &Artist) -> Self {
        NewArtistModel {
            name: artist.name.clone(),
        }
    }
}

fn repository_error(e: impl ToString) -> DomainError {
    DomainError::RepositoryError(e.to_string())
}

pub struct SqliteArtistRepository {
    pool: SqlitePool,
}

impl SqliteArtistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistRepository for SqliteArtistRepository {
    async fn insert(&self, artist: &Artist) -> Result<Artist, DomainError> {
        let mut conn = self.pool.get().map_err(repository_error)?;
        let new_artist = NewArtistModel::from(artist);

        // RETURNING hands back the generated id from the same statement
        let result = tokio::task::spawn_blocking(move || {
            diesel::insert_into(artists::table)
                .values(&new_artist)
                .returning(ArtistModel::as_returning())
                .get_result::<ArtistModel>(&mut conn)
        })
        .await
        .map_err(repository_error)?
        .map_err(repository_error)?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Artist>, DomainError> {
        let mut conn = self.pool.get().map_err(repository_error)?;

        let result = tokio::task::spawn_blocking(move || {
            artists::table
                .filter(artists::artist_id.eq(id))
                .select(ArtistModel::as_select())
                .first::<ArtistModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(repository_error)?
        .map_err(repository_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Artist>, DomainError> {
        let mut conn = self.pool.get().map_err(repository_error)?;

        let result = tokio::task::spawn_blocking(move || {
            artists::table
                .order(artists::artist_id.asc())
                .select(ArtistModel::as_select())
                .load::<ArtistModel>(&mut conn)
        })
        .await
        .map_err(repository_error)?
        .map_err(repository_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn upsert(&self, artist: &Artist) -> Result<Artist, DomainError> {
        let artist_id = artist.id.ok_or_else(|| {
            DomainError::ValidationError("Artist ID is required for upsert".to_string())
        })?;

        let mut conn = self.pool.get().map_err(repository_error)?;
        let model = ArtistModel {
            artist_id,
            name: artist.name.clone(),
        };
        let new_name = artist.name.clone();

        let result = tokio::task::spawn_blocking(move || {
            diesel::insert_into(artists::table)
                .values(&model)
                .on_conflict(artists::artist_id)
                .do_update()
                .set(artists::name.eq(new_name))
                .execute(&mut conn)?;

            // Fetch the stored row
            artists::table
                .filter(artists::artist_id.eq(artist_id))
                .select(ArtistModel::as_select())
                .first::<ArtistModel>(&mut conn)
        })
        .await
        .map_err(repository_error)?
        .map_err(repository_error)?;

        Ok(result.into())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get().map_err(repository_error)?;

        tokio::task::spawn_blocking(move || {
            diesel::delete(artists::table.filter(artists::artist_id.eq(id))).execute(&mut conn)
        })
        .await
        .map_err(repository_error)?
        .map_err(repository_error)?;

        Ok(())
    }
}
