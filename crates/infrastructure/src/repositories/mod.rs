pub mod in_memory_artist_repository;
pub mod sqlite_artist_repository;

pub use in_memory_artist_repository::InMemoryArtistRepository;
pub use sqlite_artist_repository::SqliteArtistRepository;
