use serde::{Deserialize, Serialize};

/// Catalog identifier of a movie
pub type MovieId = u64;

/// Number of lead cast members kept per movie
pub const MAX_CAST_MEMBERS: usize = 5;

/// A fully fetched movie, including the credit details used for similarity.
///
/// Optional catalog fields are `None` when the source omitted them or sent an
/// empty string; they are never defaulted to `""`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    /// Crew members whose job is "Director"
    pub directors: Vec<String>,
    /// Lead cast in billing order, at most `MAX_CAST_MEMBERS`
    pub cast: Vec<String>,
    /// Relative poster path as returned by the catalog
    pub poster_path: Option<String>,
}

impl MovieRecord {
    /// Creates a record with only an id and a title set
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            original_title: None,
            overview: None,
            release_date: None,
            vote_average: None,
            runtime: None,
            genres: Vec::new(),
            directors: Vec::new(),
            cast: Vec::new(),
            poster_path: None,
        }
    }
}

/// Listing entry returned by "popular" and search endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
}

/// One page of search results plus the catalog-wide hit count
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub total_results: u64,
    pub movies: Vec<MovieSummary>,
}
