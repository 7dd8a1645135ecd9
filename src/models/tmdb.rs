//! Wire types for The Movie Database (TMDB) v3 API.
//!
//! Every field the API may omit is optional. Conversions into the domain
//! types collapse empty strings into `None`.

use serde::Deserialize;

use super::movie::{MovieId, MovieRecord, MovieSummary, MAX_CAST_MEMBERS};

const DIRECTOR_JOB: &str = "Director";

/// Paged listing envelope (`/movie/popular`, `/search/movie`)
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// `/movie/{id}?append_to_response=credits`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Option<Vec<TmdbGenre>>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TmdbMovieSummary> for MovieSummary {
    fn from(movie: TmdbMovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.unwrap_or_default(),
            original_title: non_empty(movie.original_title),
            overview: non_empty(movie.overview),
            release_date: non_empty(movie.release_date),
            vote_average: movie.vote_average,
            poster_path: non_empty(movie.poster_path),
        }
    }
}

impl From<TmdbMovieDetails> for MovieRecord {
    fn from(movie: TmdbMovieDetails) -> Self {
        let genres = movie
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|g| g.name)
            .collect();

        let (directors, cast) = match movie.credits {
            Some(credits) => {
                let directors = credits
                    .crew
                    .into_iter()
                    .filter(|member| member.job.as_deref() == Some(DIRECTOR_JOB))
                    .map(|member| member.name)
                    .collect();
                let cast = credits
                    .cast
                    .into_iter()
                    .take(MAX_CAST_MEMBERS)
                    .map(|member| member.name)
                    .collect();
                (directors, cast)
            }
            None => (Vec::new(), Vec::new()),
        };

        Self {
            id: movie.id,
            title: movie.title.unwrap_or_default(),
            original_title: non_empty(movie.original_title),
            overview: non_empty(movie.overview),
            release_date: non_empty(movie.release_date),
            vote_average: movie.vote_average,
            runtime: movie.runtime,
            genres,
            directors,
            cast,
            poster_path: non_empty(movie.poster_path),
        }
    }
}
