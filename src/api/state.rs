use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    error::AppResult,
    services::{recommendations::load_engine, MovieCatalog, RecommendationEngine},
};

/// Shared application state
///
/// Handlers take a snapshot of the current engine and never hold the lock
/// while computing. A reload builds a complete replacement first and swaps
/// the pointer, so a query sees either the old engine or the new one.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn MovieCatalog>,
    engine: Arc<RwLock<Arc<RecommendationEngine>>>,
    reload_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<dyn MovieCatalog>,
        engine: RecommendationEngine,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            engine: Arc::new(RwLock::new(Arc::new(engine))),
            reload_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current engine snapshot
    pub async fn engine(&self) -> Arc<RecommendationEngine> {
        self.engine.read().await.clone()
    }

    /// Swaps in `engine` for every later snapshot
    pub async fn replace_engine(&self, engine: RecommendationEngine) -> Arc<RecommendationEngine> {
        let engine = Arc::new(engine);
        *self.engine.write().await = engine.clone();
        engine
    }

    /// Rebuilds corpus and matrix from the catalog, then swaps them in.
    ///
    /// Concurrent reloads run one at a time.
    pub async fn reload(&self) -> AppResult<Arc<RecommendationEngine>> {
        let _guard = self.reload_lock.lock().await;

        let engine = load_engine(self.catalog.clone(), &self.config).await?;
        Ok(self.replace_engine(engine).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::MovieRecord,
        services::{catalog::MockMovieCatalog, Corpus},
    };

    fn state_with(engine: RecommendationEngine) -> AppState {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_name().return_const("mock");
        AppState::new(Config::with_api_key("k"), Arc::new(catalog), engine)
    }

    #[tokio::test]
    async fn test_replace_engine_leaves_old_snapshot_intact() {
        let state = state_with(RecommendationEngine::default());
        let before = state.engine().await;

        let corpus = Corpus::new(vec![MovieRecord::new(1, "One"), MovieRecord::new(2, "Two")]);
        let replaced = state.replace_engine(RecommendationEngine::build(corpus)).await;

        assert_eq!(before.corpus().len(), 0);
        assert_eq!(replaced.corpus().len(), 2);
        assert!(Arc::ptr_eq(&replaced, &state.engine().await));
    }
}
