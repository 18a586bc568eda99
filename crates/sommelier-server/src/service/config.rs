use std::path::{Path, PathBuf};

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use sommelier_core::ArtifactLoader;

/// Default values for configuration options.
mod defaults {
    use std::path::PathBuf;

    /// Default location of the model artifact.
    pub fn model_path() -> PathBuf {
        "./model.json".into()
    }
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// File path to the serialized model artifact.
    ///
    /// Read once at startup for predictions and again on every health check.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MODEL_PATH", default_value = "./model.json")
    )]
    #[builder(default = "defaults::model_path()")]
    pub model_path: PathBuf,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Returns a loader reading the configured artifact.
    pub fn artifact_loader(&self) -> ArtifactLoader {
        ArtifactLoader::new(&self.model_path)
    }

    /// Checks values that cannot be expressed in the type system.
    pub fn validate(&self) -> Result<(), String> {
        validate_model_path(&self.model_path)
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(model_path) = &builder.model_path {
            validate_model_path(model_path)?;
        }

        Ok(())
    }
}

fn validate_model_path(model_path: &Path) -> Result<(), String> {
    if model_path.as_os_str().is_empty() {
        return Err("Model path cannot be empty".to_string());
    }

    Ok(())
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: defaults::model_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use sommelier_core::ModelLoader;

    use super::*;

    #[test]
    fn builder_uses_defaults() {
        let config = ServiceConfig::builder().build().unwrap();
        assert_eq!(config.model_path, PathBuf::from("./model.json"));
    }

    #[test]
    fn builder_accepts_model_path() {
        let config = ServiceConfig::builder()
            .with_model_path("/srv/models/wine.json")
            .build()
            .unwrap();

        let loader = config.artifact_loader();
        assert_eq!(loader.location(), Path::new("/srv/models/wine.json"));
    }

    #[test]
    fn builder_rejects_empty_model_path() {
        let result = ServiceConfig::builder().with_model_path("").build();
        assert!(result.is_err());
    }

    #[test]
    fn default_is_valid() {
        assert!(ServiceConfig::default().validate().is_ok());
    }
}
