use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{MovieId, MovieRecord, MovieSummary},
    services::ScoredMovie,
};

use super::AppState;

/// Maximum number of search hits returned to the client
pub const MAX_SEARCH_RESULTS: usize = 10;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MovieSummaryResponse {
    pub id: MovieId,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
}

impl MovieSummaryResponse {
    fn from_summary(movie: MovieSummary, image_base_url: &str) -> Self {
        Self {
            poster_path: poster_url(image_base_url, movie.poster_path.as_deref()),
            id: movie.id,
            title: movie.title,
            original_title: movie.original_title,
            overview: movie.overview,
            release_date: movie.release_date,
            vote_average: movie.vote_average,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_results: u64,
    pub results: Vec<MovieSummaryResponse>,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    pub id: MovieId,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub cast: Vec<String>,
    pub poster_path: Option<String>,
}

impl MovieDetailResponse {
    fn from_record(movie: MovieRecord, image_base_url: &str) -> Self {
        Self {
            poster_path: poster_url(image_base_url, movie.poster_path.as_deref()),
            id: movie.id,
            title: movie.title,
            original_title: movie.original_title,
            overview: movie.overview,
            release_date: movie.release_date,
            vote_average: movie.vote_average,
            runtime: movie.runtime,
            genres: movie.genres,
            directors: movie.directors,
            cast: movie.cast,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub movie_ids: Option<Vec<MovieId>>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub id: MovieId,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub similarity_score: f64,
    pub genres: Vec<String>,
    pub poster_path: Option<String>,
}

impl RecommendationResponse {
    fn from_scored(scored: ScoredMovie, image_base_url: &str) -> Self {
        let movie = scored.movie;
        Self {
            poster_path: poster_url(image_base_url, movie.poster_path.as_deref()),
            id: movie.id,
            title: movie.title,
            original_title: movie.original_title,
            overview: movie.overview,
            release_date: movie.release_date,
            vote_average: movie.vote_average,
            similarity_score: scored.similarity_score,
            genres: movie.genres,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub selected_count: usize,
    pub recommendations: Vec<RecommendationResponse>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub movie_count: usize,
    pub ready: bool,
    pub built_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub movie_count: usize,
    pub built_at: Option<DateTime<Utc>>,
}

/// Absolute poster URL, or `None` when the movie has no poster
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path.map(|path| format!("{}{}", image_base_url, path))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Title search passed through to the catalog
pub async fn search_movies(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let query = params
        .q
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Search query 'q' is required".to_string()))?;

    tracing::info!(request_id = %request_id, query = %query, "Searching movies");

    let found = state.catalog.search_movies(&query).await?;
    let image_base_url = &state.config.tmdb_image_base_url;

    let results = found
        .movies
        .into_iter()
        .take(MAX_SEARCH_RESULTS)
        .map(|movie| MovieSummaryResponse::from_summary(movie, image_base_url))
        .collect();

    Ok(Json(SearchResponse {
        query,
        total_results: found.total_results,
        results,
    }))
}

/// Movie details, served from the corpus when loaded there
pub async fn get_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<MovieDetailResponse>> {
    let engine = state.engine().await;

    let movie = match engine.find_by_id(movie_id) {
        Some(movie) => movie.clone(),
        None => {
            tracing::debug!(
                request_id = %request_id,
                movie_id,
                "Movie not in corpus, fetching from catalog"
            );
            state.catalog.movie_details(movie_id).await.map_err(|e| {
                tracing::error!(request_id = %request_id, movie_id, error = %e, "Movie lookup failed");
                e
            })?
        }
    };

    Ok(Json(MovieDetailResponse::from_record(
        movie,
        &state.config.tmdb_image_base_url,
    )))
}

/// Recommendations seeded by the caller's selected movies
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let movie_ids = request.movie_ids.unwrap_or_default();
    if movie_ids.is_empty() {
        return Err(AppError::InvalidInput(
            "Select at least one movie".to_string(),
        ));
    }

    let min_seeds = state.config.min_seed_count;
    if movie_ids.len() < min_seeds {
        return Err(AppError::InvalidInput(format!(
            "Select at least {} movies",
            min_seeds
        )));
    }

    tracing::info!(
        request_id = %request_id,
        seed_count = movie_ids.len(),
        "Processing recommendation request"
    );

    let engine = state.engine().await;
    let recommendations = engine.recommend(&movie_ids, state.config.recommendation_count);

    tracing::info!(
        request_id = %request_id,
        recommendation_count = recommendations.len(),
        "Recommendations computed"
    );

    let image_base_url = &state.config.tmdb_image_base_url;

    Ok(Json(RecommendResponse {
        selected_count: movie_ids.len(),
        recommendations: recommendations
            .into_iter()
            .map(|scored| RecommendationResponse::from_scored(scored, image_base_url))
            .collect(),
    }))
}

/// Engine readiness and corpus size
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let engine = state.engine().await;

    Json(StatusResponse {
        movie_count: engine.corpus().len(),
        ready: engine.is_ready(),
        built_at: engine.built_at(),
    })
}

/// Reloads the corpus from the catalog and swaps in a new engine
pub async fn reload(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<ReloadResponse>> {
    tracing::info!(request_id = %request_id, "Reloading movie corpus");

    let engine = state.reload().await?;

    tracing::info!(
        request_id = %request_id,
        movies = engine.corpus().len(),
        "Movie corpus reloaded"
    );

    Ok(Json(ReloadResponse {
        movie_count: engine.corpus().len(),
        built_at: engine.built_at(),
    }))
}
