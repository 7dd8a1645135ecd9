use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieId, MovieRecord},
    services::{
        catalog::MovieCatalog,
        corpus::{Corpus, CorpusBuilder},
        features::movie_features,
        similarity::SimilarityMatrix,
        tfidf::TfidfVectorizer,
    },
};

/// A recommended movie with its mean similarity to the seeds
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie: MovieRecord,
    pub similarity_score: f64,
}

/// Content-based recommender over a fixed corpus.
///
/// The corpus and matrix never change after `build_matrix`; a reload builds
/// a new engine and swaps it in whole.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    corpus: Corpus,
    matrix: Option<SimilarityMatrix>,
    built_at: Option<DateTime<Utc>>,
}

impl RecommendationEngine {
    /// Wraps a corpus without computing similarities yet
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            matrix: None,
            built_at: None,
        }
    }

    /// Wraps a corpus and computes its similarity matrix
    pub fn build(corpus: Corpus) -> Self {
        let mut engine = Self::new(corpus);
        engine.build_matrix();
        engine
    }

    /// Vectorizes every movie and computes all pairwise similarities.
    ///
    /// CPU-bound and quadratic in corpus size; call from a blocking context.
    pub fn build_matrix(&mut self) {
        let started = Instant::now();

        let documents: Vec<String> = self.corpus.movies().iter().map(movie_features).collect();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&documents);
        let matrix = SimilarityMatrix::from_vectors(&vectors);

        tracing::info!(
            movies = matrix.len(),
            vocabulary = vectorizer.vocabulary_len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity matrix built"
        );

        self.matrix = Some(matrix);
        self.built_at = Some(Utc::now());
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn matrix(&self) -> Option<&SimilarityMatrix> {
        self.matrix.as_ref()
    }

    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.built_at
    }

    pub fn is_ready(&self) -> bool {
        self.matrix.is_some() && !self.corpus.is_empty()
    }

    pub fn find_by_id(&self, id: MovieId) -> Option<&MovieRecord> {
        self.corpus.find_by_id(id)
    }

    /// Ranks the corpus by mean similarity to `seed_ids`.
    ///
    /// Unknown ids are ignored and repeated ids count once. Seeds are never
    /// returned. Equal scores keep ascending corpus order. Returns an empty
    /// list when no seed resolves or the matrix has not been built.
    pub fn recommend(&self, seed_ids: &[MovieId], n: usize) -> Vec<ScoredMovie> {
        let Some(matrix) = self.matrix.as_ref() else {
            return Vec::new();
        };

        let mut seed_indices: Vec<usize> = Vec::new();
        for &id in seed_ids {
            if let Some(index) = self.corpus.position_of(id) {
                if !seed_indices.contains(&index) {
                    seed_indices.push(index);
                }
            }
        }

        let Some(scores) = matrix.mean_of_rows(&seed_indices) else {
            return Vec::new();
        };

        let seeds: HashSet<usize> = seed_indices.iter().copied().collect();

        let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranked
            .into_iter()
            .filter(|(index, _)| !seeds.contains(index))
            .take(n)
            .filter_map(|(index, score)| {
                self.corpus.get(index).map(|movie| ScoredMovie {
                    movie: movie.clone(),
                    similarity_score: score,
                })
            })
            .collect()
    }
}

/// Loads a fresh corpus from `catalog` and builds its engine.
///
/// Page and item failures shrink the corpus rather than failing; only a
/// panicked matrix build is an error.
pub async fn load_engine(
    catalog: Arc<dyn MovieCatalog>,
    config: &Config,
) -> AppResult<RecommendationEngine> {
    let corpus = CorpusBuilder::new(catalog)
        .deduplicate(config.deduplicate_corpus)
        .load(config.corpus_pages)
        .await;

    tokio::task::spawn_blocking(move || RecommendationEngine::build(corpus))
        .await
        .map_err(|e| AppError::Internal(format!("Similarity matrix build failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::MovieSummary, services::catalog::MockMovieCatalog};

    fn movie(
        id: MovieId,
        genres: &[&str],
        directors: &[&str],
        cast: &[&str],
        overview: Option<&str>,
    ) -> MovieRecord {
        let mut record = MovieRecord::new(id, format!("Movie {}", id));
        record.genres = genres.iter().map(|s| s.to_string()).collect();
        record.directors = directors.iter().map(|s| s.to_string()).collect();
        record.cast = cast.iter().map(|s| s.to_string()).collect();
        record.overview = overview.map(str::to_string);
        record
    }

    /// A and B share genre and director; C shares nothing with either
    fn sample_corpus() -> Corpus {
        Corpus::new(vec![
            movie(
                1,
                &["Thriller"],
                &["Denis Villeneuve"],
                &["Amy Adams"],
                Some("Linguists decode alien language."),
            ),
            movie(
                2,
                &["Thriller"],
                &["Denis Villeneuve"],
                &["Jake Gyllenhaal"],
                Some("A detective hunts a kidnapper."),
            ),
            movie(
                3,
                &["Animation"],
                &["Hayao Miyazaki"],
                &["Rumi Hiiragi"],
                Some("Spirits bathhouse adventure."),
            ),
            movie(
                4,
                &["Comedy"],
                &["Wes Anderson"],
                &["Ralph Fiennes"],
                Some("Concierge hotel caper."),
            ),
            movie(
                5,
                &["Thriller", "Comedy"],
                &["Bong Joon-ho"],
                &["Song Kang-ho"],
                Some("Family schemes household."),
            ),
        ])
    }

    fn ids(recommendations: &[ScoredMovie]) -> Vec<MovieId> {
        recommendations.iter().map(|r| r.movie.id).collect()
    }

    #[test]
    fn test_shared_genre_and_director_ranks_first() {
        let engine = RecommendationEngine::build(sample_corpus());
        let recommendations = engine.recommend(&[1], 2);

        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].movie.id, 2);

        let c_score = engine
            .recommend(&[1], 4)
            .into_iter()
            .find(|r| r.movie.id == 3)
            .map(|r| r.similarity_score)
            .unwrap();
        assert!(recommendations[0].similarity_score > c_score);
    }

    #[test]
    fn test_seeds_are_never_returned() {
        let engine = RecommendationEngine::build(sample_corpus());
        let recommendations = engine.recommend(&[1, 2, 5], 10);

        let returned = ids(&recommendations);
        assert!(!returned.contains(&1));
        assert!(!returned.contains(&2));
        assert!(!returned.contains(&5));
        assert_eq!(returned.len(), 2);
    }

    #[test]
    fn test_output_is_sorted_and_deterministic() {
        let engine = RecommendationEngine::build(sample_corpus());
        let first = engine.recommend(&[5], 10);
        let second = engine.recommend(&[5], 10);

        assert_eq!(first, second);
        assert!(first
            .windows(2)
            .all(|pair| pair[0].similarity_score >= pair[1].similarity_score));
    }

    #[test]
    fn test_length_is_bounded_by_n() {
        let engine = RecommendationEngine::build(sample_corpus());
        assert_eq!(engine.recommend(&[1], 3).len(), 3);
        assert_eq!(engine.recommend(&[1], 0).len(), 0);
        assert_eq!(engine.recommend(&[1], 100).len(), 4);
    }

    #[test]
    fn test_unknown_seed_is_ignored() {
        let engine = RecommendationEngine::build(sample_corpus());
        assert_eq!(engine.recommend(&[1, 999], 4), engine.recommend(&[1], 4));
    }

    #[test]
    fn test_repeated_seed_counts_once() {
        let engine = RecommendationEngine::build(sample_corpus());
        assert_eq!(engine.recommend(&[1, 1, 4], 3), engine.recommend(&[1, 4], 3));
    }

    #[test]
    fn test_no_resolved_seed_is_empty() {
        let engine = RecommendationEngine::build(sample_corpus());
        assert!(engine.recommend(&[998, 999], 5).is_empty());
        assert!(engine.recommend(&[], 5).is_empty());
    }

    #[test]
    fn test_unbuilt_or_empty_engine_is_empty() {
        let unbuilt = RecommendationEngine::new(sample_corpus());
        assert!(!unbuilt.is_ready());
        assert!(unbuilt.recommend(&[1], 5).is_empty());

        let empty = RecommendationEngine::build(Corpus::default());
        assert!(!empty.is_ready());
        assert!(empty.recommend(&[1], 5).is_empty());
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let corpus = Corpus::new(vec![
            movie(1, &["Western"], &[], &[], None),
            movie(2, &["Horror"], &[], &[], None),
            movie(3, &["Musical"], &[], &[], None),
            movie(4, &["Documentary"], &[], &[], None),
        ]);
        let engine = RecommendationEngine::build(corpus);

        let recommendations = engine.recommend(&[1], 3);
        assert_eq!(ids(&recommendations), vec![2, 3, 4]);
        assert!(recommendations.iter().all(|r| r.similarity_score == 0.0));
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first_occurrence() {
        let corpus = Corpus::new(vec![
            movie(1, &["Western"], &[], &[], None),
            movie(2, &["Western"], &[], &[], None),
            movie(1, &["Horror"], &[], &[], None),
        ]);
        let engine = RecommendationEngine::build(corpus);

        let recommendations = engine.recommend(&[1], 5);
        assert_eq!(recommendations[0].movie.id, 2);
        assert!((recommendations[0].similarity_score - 1.0).abs() < 1e-9);
        assert_eq!(engine.find_by_id(1).map(|m| m.genres[0].as_str()), Some("Western"));
    }

    #[test]
    fn test_build_records_timestamp() {
        let engine = RecommendationEngine::build(sample_corpus());
        assert!(engine.is_ready());
        assert!(engine.built_at().is_some());
        assert_eq!(engine.matrix().map(SimilarityMatrix::len), Some(5));
    }

    #[tokio::test]
    async fn test_load_engine_builds_from_catalog() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_name().return_const("mock");
        catalog.expect_popular_movies().returning(|page| {
            Ok(vec![MovieSummary {
                id: page as MovieId,
                title: format!("Movie {}", page),
                original_title: None,
                overview: None,
                release_date: None,
                vote_average: None,
                poster_path: None,
            }])
        });
        catalog.expect_movie_details().returning(|id| {
            let mut record = MovieRecord::new(id, format!("Movie {}", id));
            record.genres = vec!["Drama".to_string()];
            Ok(record)
        });

        let mut config = Config::with_api_key("k");
        config.corpus_pages = 3;

        let engine = load_engine(Arc::new(catalog), &config).await.unwrap();

        assert_eq!(engine.corpus().len(), 3);
        assert!(engine.is_ready());
        assert_eq!(ids(&engine.recommend(&[1], 5)), vec![2, 3]);
    }
}
