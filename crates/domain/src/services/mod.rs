pub mod artist_service;

pub use artist_service::ArtistService;
