use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    models::{MovieId, MovieRecord},
    services::catalog::MovieCatalog,
};

/// Ordered, read-only collection of fetched movies.
///
/// Position in the corpus is the row/column index in the similarity matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    movies: Vec<MovieRecord>,
}

impl Corpus {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Linear scan for the first record with `id`
    pub fn find_by_id(&self, id: MovieId) -> Option<&MovieRecord> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    /// Index of the first record with `id`
    pub fn position_of(&self, id: MovieId) -> Option<usize> {
        self.movies.iter().position(|movie| movie.id == id)
    }
}

/// Pulls the "popular" listing page by page and enriches every entry
/// with its full details.
pub struct CorpusBuilder {
    catalog: Arc<dyn MovieCatalog>,
    deduplicate: bool,
}

impl CorpusBuilder {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            catalog,
            deduplicate: true,
        }
    }

    /// When false, a movie listed on several pages is kept once per listing
    pub fn deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Fetches pages `1..=page_count` sequentially.
    ///
    /// A failed page is logged and skipped; a failed detail fetch drops
    /// only that movie. Never fails as a whole.
    pub async fn load(&self, page_count: u32) -> Corpus {
        tracing::info!(
            pages = page_count,
            catalog = self.catalog.name(),
            "Loading movie corpus"
        );

        let mut movies: Vec<MovieRecord> = Vec::new();
        let mut seen: HashSet<MovieId> = HashSet::new();
        let mut duplicates = 0usize;

        for page in 1..=page_count {
            let summaries = match self.catalog.popular_movies(page).await {
                Ok(summaries) => summaries,
                Err(e) => {
                    tracing::warn!(page, error = %e, "Failed to load popular page, skipping");
                    continue;
                }
            };

            for summary in summaries {
                if self.deduplicate && seen.contains(&summary.id) {
                    duplicates += 1;
                    continue;
                }

                match self.catalog.movie_details(summary.id).await {
                    Ok(movie) => {
                        seen.insert(summary.id);
                        movies.push(movie);
                    }
                    Err(e) => {
                        tracing::debug!(movie_id = summary.id, error = %e, "Skipping movie");
                    }
                }
            }

            tracing::info!(
                page,
                pages = page_count,
                movies = movies.len(),
                "Popular page loaded"
            );
        }

        if duplicates > 0 {
            tracing::info!(duplicates, "Dropped movies listed on more than one page");
        }

        tracing::info!(movies = movies.len(), "Movie corpus loaded");

        Corpus::new(movies)
    }
}
