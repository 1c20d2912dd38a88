use application::{ArtistApp, StorageBackend};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use config::{Config, StorageKind};
use domain::{Artist, DomainError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Name checks applied to request bodies before they reach the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidation {
    /// Accept missing or empty names, as the service does
    Lenient,
    /// Reject bodies whose name is missing or blank with 400
    RequireName,
}

impl NameValidation {
    fn check(self, request: &ArtistRequest) -> Result<(), DomainError> {
        match self {
            NameValidation::Lenient => Ok(()),
            NameValidation::RequireName => match request.name.as_deref() {
                Some(name) if !name.trim().is_empty() => Ok(()),
                _ => Err(DomainError::ValidationError(
                    "Artist name is required".to_string(),
                )),
            },
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    artist_app: Arc<ArtistApp>,
    name_validation: NameValidation,
}

impl AppState {
    pub fn new(artist_app: ArtistApp, name_validation: NameValidation) -> Self {
        Self {
            artist_app: Arc::new(artist_app),
            name_validation,
        }
    }
}

/// Request body for create and update. Ids in the body are ignored.
#[derive(Debug, Deserialize)]
struct ArtistRequest {
    #[serde(default)]
    name: Option<String>,
}

impl From<ArtistRequest> for Artist {
    fn from(request: ArtistRequest) -> Self {
        Artist::new(request.name)
    }
}

#[derive(Debug, Serialize)]
struct ArtistInfo {
    id: Option<i32>,
    name: Option<String>,
}

impl From<Artist> for ArtistInfo {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

/// Service outcomes mapped to HTTP statuses
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::ArtistNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
            DomainError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("request failed: {}", self.0);
        } else {
            warn!("request rejected: {}", self.0);
        }

        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn storage_backend(config: &Config) -> StorageBackend {
    match config.storage {
        StorageKind::Sqlite => StorageBackend::Sqlite {
            database_path: config.database_path.clone(),
            pool_size: config.database_pool_size,
        },
        StorageKind::Memory => StorageBackend::InMemory,
    }
}

pub fn name_validation(config: &Config) -> NameValidation {
    if config.require_artist_name {
        NameValidation::RequireName
    } else {
        NameValidation::Lenient
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/artists", get(list_artists).post(create_artist))
        .route(
            "/api/artists/:id",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
        // Older clients list artists here
        .route("/artists", get(list_artists))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the app from `config` and serve until Ctrl-C.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let backend = storage_backend(&config);
    let artist_app = ArtistApp::new(&backend)?;
    let state = AppState::new(artist_app, name_validation(&config));

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API Server listening on http://{}", bind_address);
    info!("   GET    /api/artists      - List all artists");
    info!("   POST   /api/artists      - Create artist");
    info!("   GET    /api/artists/:id  - Get artist");
    info!("   PUT    /api/artists/:id  - Replace artist name");
    info!("   DELETE /api/artists/:id  - Delete artist");
    info!("   GET    /health           - Health check");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl-C: {}", e);
    }
}

// Handler functions
async fn list_artists(State(state): State<AppState>) -> Result<Json<Vec<ArtistInfo>>, ApiError> {
    let artists = state.artist_app.artist_service.get_all_artists().await?;
    Ok(Json(artists.into_iter().map(Into::into).collect()))
}

async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistInfo>, ApiError> {
    let artist = state.artist_app.artist_service.get_artist_by_id(id).await?;
    Ok(Json(artist.into()))
}

async fn create_artist(
    State(state): State<AppState>,
    Json(payload): Json<ArtistRequest>,
) -> Result<(StatusCode, Json<ArtistInfo>), ApiError> {
    state.name_validation.check(&payload)?;

    let artist = state
        .artist_app
        .artist_service
        .create_artist(payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(artist.into())))
}

async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ArtistRequest>,
) -> Result<Json<ArtistInfo>, ApiError> {
    state.name_validation.check(&payload)?;

    let artist = state
        .artist_app
        .artist_service
        .update_artist(id, payload.into())
        .await?;
    Ok(Json(artist.into()))
}

async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.artist_app.artist_service.delete_artist(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(storage: StorageKind, require_artist_name: bool) -> Config {
        Config {
            api_host: "127.0.0.1".to_string(),
            api_port: 0,
            storage,
            database_path: "catalog.db".to_string(),
            database_pool_size: 3,
            require_artist_name,
        }
    }

    #[test]
    fn sqlite_config_maps_to_sqlite_backend() {
        assert_eq!(
            storage_backend(&config(StorageKind::Sqlite, false)),
            StorageBackend::Sqlite {
                database_path: "catalog.db".to_string(),
                pool_size: 3,
            }
        );
        assert_eq!(
            storage_backend(&config(StorageKind::Memory, false)),
            StorageBackend::InMemory
        );
    }

    #[test]
    fn require_name_flag_selects_policy() {
        assert_eq!(name_validation(&config(StorageKind::Memory, true)), NameValidation::RequireName);
        assert_eq!(name_validation(&config(StorageKind::Memory, false)), NameValidation::Lenient);
    }

    #[test]
    fn lenient_policy_accepts_anything() {
        let request = ArtistRequest { name: None };
        assert!(NameValidation::Lenient.check(&request).is_ok());
    }
}
