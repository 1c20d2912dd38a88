use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use domain::DomainError;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY_PATH: &str = ":memory:";

const CREATE_ARTIST_TABLE: &str = "CREATE TABLE IF NOT EXISTS Artist (
    ArtistId INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    Name TEXT
)";

/// Applied to every pooled connection so concurrent writers wait for the
/// file lock instead of failing with SQLITE_BUSY.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout_ms: u32,
}

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        diesel::sql_query(format!("PRAGMA busy_timeout = {}", self.busy_timeout_ms))
            .execute(conn)
            .map(|_| ())
            .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pooled SQLite database and make sure the Artist table exists.
    ///
    /// Every connection to `:memory:` opens its own database, so that path
    /// always gets a single-connection pool.
    pub fn new(database_path: &str, pool_size: u32) -> Result<Self, DomainError> {
        let pool_size = if database_path == IN_MEMORY_PATH {
            1
        } else {
            pool_size.max(1)
        };

        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let mut builder = r2d2::Pool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout_ms: 5_000,
            }));
        if database_path == IN_MEMORY_PATH {
            // Recycling the only connection would drop the database with it
            builder = builder.idle_timeout(None).max_lifetime(None);
        }
        let pool = builder
            .build(manager)
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let mut conn = pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;
        diesel::sql_query(CREATE_ARTIST_TABLE)
            .execute(&mut conn)
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        info!(path = database_path, pool_size, "sqlite database ready");

        Ok(Database { pool })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        Self::new(IN_MEMORY_PATH, 1)
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
