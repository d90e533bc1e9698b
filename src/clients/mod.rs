pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbConfig};
