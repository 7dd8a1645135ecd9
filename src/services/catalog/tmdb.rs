/// TMDB (The Movie Database) v3 catalog
///
/// API Flow:
/// 1. Corpus: /movie/popular?page=P → summaries, then /movie/{id}?append_to_response=credits
/// 2. Search: /search/movie?query=Q&page=1
use std::time::Duration;

use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        MovieId, MovieRecord, MovieSummary, SearchResults, TmdbMovieDetails, TmdbMovieSummary,
        TmdbPage,
    },
    services::catalog::MovieCatalog,
};

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbCatalog {
    /// Creates a TMDB client whose every call is bounded by `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        language: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Issues a GET with the shared auth/language parameters plus `params`
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalApi(format!(
            "TMDB API returned status {}: {}",
            status, body
        )))
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn popular_movies(&self, page: u32) -> AppResult<Vec<MovieSummary>> {
        let listing: TmdbPage<TmdbMovieSummary> = self
            .get_json("/movie/popular", &[("page", page.to_string())])
            .await?;

        Ok(listing.results.into_iter().map(MovieSummary::from).collect())
    }

    async fn movie_details(&self, id: MovieId) -> AppResult<MovieRecord> {
        let details: TmdbMovieDetails = self
            .get_json(
                &format!("/movie/{}", id),
                &[("append_to_response", "credits".to_string())],
            )
            .await?;

        Ok(MovieRecord::from(details))
    }

    async fn search_movies(&self, query: &str) -> AppResult<SearchResults> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let listing: TmdbPage<TmdbMovieSummary> = self
            .get_json(
                "/search/movie",
                &[("query", query.to_string()), ("page", "1".to_string())],
            )
            .await?;

        tracing::info!(
            query = %query,
            results = listing.results.len(),
            catalog = self.name(),
            "Movie search completed"
        );

        Ok(SearchResults {
            total_results: listing.total_results,
            movies: listing.results.into_iter().map(MovieSummary::from).collect(),
        })
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
