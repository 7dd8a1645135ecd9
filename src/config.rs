use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key (v3 auth)
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language requested for titles and overviews
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Prefix prepended to `poster_path` to build an absolute poster URL
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of "popular" pages pulled into the corpus
    #[serde(default = "default_corpus_pages")]
    pub corpus_pages: u32,

    /// Per-request timeout against the catalog, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of recommendations returned per query
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Minimum number of seed movies a caller must select
    #[serde(default = "default_min_seed_count")]
    pub min_seed_count: usize,

    /// Drop records whose id was already fetched from an earlier page
    #[serde(default = "default_deduplicate_corpus")]
    pub deduplicate_corpus: bool,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "ko-KR".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_corpus_pages() -> u32 {
    10
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_recommendation_count() -> usize {
    20
}

fn default_min_seed_count() -> usize {
    3
}

fn default_deduplicate_corpus() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Builds a configuration with every default applied around the given API key
    pub fn with_api_key(tmdb_api_key: impl Into<String>) -> Self {
        Self {
            tmdb_api_key: tmdb_api_key.into(),
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_language: default_tmdb_language(),
            tmdb_image_base_url: default_tmdb_image_base_url(),
            host: default_host(),
            port: default_port(),
            corpus_pages: default_corpus_pages(),
            request_timeout_secs: default_request_timeout_secs(),
            recommendation_count: default_recommendation_count(),
            min_seed_count: default_min_seed_count(),
            deduplicate_corpus: default_deduplicate_corpus(),
        }
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_only_require_api_key() {
        let vars = vec![("TMDB_API_KEY".to_string(), "secret".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.tmdb_api_key, "secret");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.port, 5001);
        assert_eq!(config.corpus_pages, 10);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.recommendation_count, 20);
        assert_eq!(config.min_seed_count, 3);
        assert!(config.deduplicate_corpus);
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let vars: Vec<(String, String)> = vec![("PORT".to_string(), "8080".to_string())];
        let result = envy::from_iter::<_, Config>(vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "k".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("DEDUPLICATE_CORPUS".to_string(), "false".to_string()),
            ("CORPUS_PAGES".to_string(), "2".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(!config.deduplicate_corpus);
        assert_eq!(config.corpus_pages, 2);
    }

    #[test]
    fn test_with_api_key_matches_env_defaults() {
        let config = Config::with_api_key("abc");
        assert_eq!(config.tmdb_language, "ko-KR");
        assert_eq!(config.tmdb_image_base_url, "https://image.tmdb.org/t/p/w500");
    }
}
