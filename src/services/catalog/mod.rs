/// Movie metadata source abstraction
///
/// The corpus builder and the pass-through search/detail routes only talk to
/// this trait, so the TMDB client can be swapped for a stub in tests.
use crate::{
    error::AppResult,
    models::{MovieId, MovieRecord, MovieSummary, SearchResults},
};

pub mod tmdb;

/// Trait for movie metadata catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Fetch one page (1-based) of the "popular movies" listing
    async fn popular_movies(&self, page: u32) -> AppResult<Vec<MovieSummary>>;

    /// Fetch full details for one movie, including genres and credits
    async fn movie_details(&self, id: MovieId) -> AppResult<MovieRecord>;

    /// Free-text title search, first page only
    async fn search_movies(&self, query: &str) -> AppResult<SearchResults>;

    /// Catalog name for logging and debugging
    fn name(&self) -> &'static str;
}
