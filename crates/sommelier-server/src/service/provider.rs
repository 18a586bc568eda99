//! Model loading on behalf of the service.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock};

use sommelier_core::{LoadError, LoadStatus, ModelHandle, ModelLoader};

use crate::{Error, Result};

/// Tracing target for model provider operations.
const TRACING_TARGET: &str = "sommelier_server::service::provider";

/// Loads model handles off the async runtime and remembers the last outcome.
///
/// Every call performs a fresh read through the wrapped [`ModelLoader`]. The
/// recorded [`LoadStatus`] is informational only: handles are never cached
/// here, and predictions never consult it.
#[derive(Clone)]
pub struct ModelProvider {
    loader: Arc<dyn ModelLoader>,
    status: Arc<RwLock<LoadStatus>>,
}

impl ModelProvider {
    /// Creates a provider for the given loader.
    pub fn new(loader: impl ModelLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            status: Arc::default(),
        }
    }

    /// Returns the location models are loaded from.
    pub fn location(&self) -> &Path {
        self.loader.location()
    }

    /// Returns the outcome of the most recent load attempt.
    pub fn status(&self) -> LoadStatus {
        match self.status.read() {
            Ok(status) => status.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Loads a fresh model handle on the blocking thread pool.
    ///
    /// Load failures keep their [`LoadError`] class; a loader that panics
    /// yields an internal error.
    pub async fn load(&self) -> Result<ModelHandle> {
        let loader = Arc::clone(&self.loader);
        let outcome = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|err| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %err,
                    path = %self.location().display(),
                    "model load task failed"
                );
                Error::internal("model load task failed").with_source(err)
            })?;

        self.record(&outcome);
        outcome.map_err(Error::from)
    }

    /// Checks that the artifact is currently loadable.
    ///
    /// The loaded handle is dropped immediately; it never replaces the model
    /// serving predictions.
    pub async fn probe(&self) -> Result<()> {
        self.load().await.map(drop)
    }

    fn record(&self, outcome: &Result<ModelHandle, LoadError>) {
        let next = LoadStatus::from_outcome(outcome);
        let mut status = match self.status.write() {
            Ok(status) => status,
            Err(poisoned) => poisoned.into_inner(),
        };

        if *status != next {
            tracing::info!(
                target: TRACING_TARGET,
                path = %self.loader.location().display(),
                from = status.as_str(),
                to = next.as_str(),
                failure = ?next.failure(),
                "model status changed"
            );
        }

        *status = next;
    }
}

impl fmt::Debug for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelProvider")
            .field("location", &self.location())
            .field("status", &self.status())
            .finish()
    }
}
