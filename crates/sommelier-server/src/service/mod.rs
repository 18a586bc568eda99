//! Application state and dependency injection.

mod config;
mod provider;

use sommelier_core::{ModelHandle, ModelLoader};

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::provider::ModelProvider;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Tracing target for service initialization.
const TRACING_TARGET: &str = "sommelier_server::service";

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// Model serving predictions, loaded once at startup.
    pub model: ModelHandle,
    /// Fresh-load access to the artifact for health checks.
    pub provider: ModelProvider,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Loads the model artifact; a missing or unloadable artifact is fatal.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate().map_err(Error::config)?;
        Self::from_loader(service_config.artifact_loader()).await
    }

    /// Initializes application state from an arbitrary model loader.
    pub async fn from_loader(loader: impl ModelLoader) -> Result<Self> {
        let provider = ModelProvider::new(loader);
        let model = provider.load().await?;

        tracing::info!(
            target: TRACING_TARGET,
            path = %provider.location().display(),
            algorithm = model.name(),
            "model loaded"
        );

        Ok(Self::from_parts(model, provider))
    }

    /// Assembles state from an already loaded model.
    ///
    /// The model is not required to come from `provider`.
    pub fn from_parts(model: ModelHandle, provider: ModelProvider) -> Self {
        Self { model, provider }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(model: ModelHandle);
impl_di!(provider: ModelProvider);
