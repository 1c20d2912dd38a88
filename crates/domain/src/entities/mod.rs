pub mod artist;

pub use artist::*;
