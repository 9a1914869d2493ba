use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use movierec_api::{
    api::{create_router, AppState},
    config::Config,
    dataset::FileDatasetLoader,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movierec_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.bind_addr();

    let loader = Arc::new(FileDatasetLoader::new(&config.dataset_path));
    let state = AppState::load(loader, config).await?;
    let summary = state.dataset().await.summary();
    tracing::info!(
        records = summary.records,
        movies = summary.movies,
        users = summary.users,
        "Dataset ready"
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
