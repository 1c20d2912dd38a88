pub mod artist_repository;

pub use artist_repository::ArtistRepository;
