pub mod catalog;
pub mod corpus;
pub mod features;
pub mod recommendations;
pub mod similarity;
pub mod stop_words;
pub mod tfidf;

pub use catalog::{tmdb::TmdbCatalog, MovieCatalog};
pub use corpus::{Corpus, CorpusBuilder};
pub use recommendations::{RecommendationEngine, ScoredMovie};
