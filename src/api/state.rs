use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::Config,
    dataset::{Dataset, DatasetLoader},
    error::AppResult,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    pub loader: Arc<dyn DatasetLoader>,
    pub config: Arc<Config>,
}

/// Inner state that can be swapped on reload
pub struct AppStateInner {
    pub dataset: Arc<Dataset>,
}

impl AppState {
    /// Creates state around an already loaded dataset
    pub fn new(dataset: Dataset, loader: Arc<dyn DatasetLoader>, config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                dataset: Arc::new(dataset),
            })),
            loader,
            config: Arc::new(config),
        }
    }

    /// Runs the loader once and wraps the result
    pub async fn load(loader: Arc<dyn DatasetLoader>, config: Config) -> AppResult<Self> {
        let dataset = loader.load().await?;
        Ok(Self::new(dataset, loader, config))
    }

    /// Snapshot of the current dataset
    ///
    /// Queries hold the snapshot for their whole computation, so a concurrent
    /// reload never changes data under them.
    pub async fn dataset(&self) -> Arc<Dataset> {
        self.inner.read().await.dataset.clone()
    }

    /// Loads a fresh dataset and swaps it in as a whole
    ///
    /// On failure the current dataset stays in place.
    pub async fn reload(&self) -> AppResult<Arc<Dataset>> {
        let fresh = Arc::new(self.loader.load().await?);
        self.inner.write().await.dataset = fresh.clone();

        tracing::info!(
            source = %self.loader.source(),
            records = fresh.len(),
            "Dataset reloaded"
        );

        Ok(fresh)
    }
}
