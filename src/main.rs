use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinematch_api::{
    api::{create_router, AppState},
    config::Config,
    services::{recommendations::load_engine, MovieCatalog, TmdbCatalog},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbCatalog::from_config(&config)?);

    // Blocks startup until the corpus is fetched and the matrix is built
    tracing::info!(pages = config.corpus_pages, "Initializing recommendation engine");
    let engine = load_engine(catalog.clone(), &config).await?;
    tracing::info!(
        movies = engine.corpus().len(),
        "Recommendation engine ready"
    );

    let address = config.bind_address();
    let state = AppState::new(config, catalog, engine);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
