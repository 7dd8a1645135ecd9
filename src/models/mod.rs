pub mod movie;
pub mod tmdb;

pub use movie::{MovieId, MovieRecord, MovieSummary, SearchResults, MAX_CAST_MEMBERS};
pub use tmdb::{
    TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbGenre, TmdbMovieDetails, TmdbMovieSummary,
    TmdbPage,
};
