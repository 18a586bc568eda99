//! Reading model artifacts from storage.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::TRACING_TARGET_LOADER;
use crate::model::{LoadFailure, ModelArtifact, ModelHandle};

/// Failure to obtain a [`ModelHandle`] from storage.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing exists at the configured location.
    #[error("model artifact not found at '{}'", path.display())]
    NotFound {
        /// Location that was probed.
        path: PathBuf,
    },

    /// The artifact exists but could not be read.
    #[error("failed to read model artifact at '{}': {source}", path.display())]
    Io {
        /// Location that was probed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The artifact was read but is not a valid model.
    #[error("failed to deserialize model artifact at '{}': {source}", path.display())]
    Deserialize {
        /// Location that was probed.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Classifies an I/O error raised while reading `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Returns the location the failed load was attempted from.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Deserialize { path, .. } => path,
        }
    }

    /// Returns the failure class used by readiness reporting.
    #[must_use]
    pub const fn failure(&self) -> LoadFailure {
        match self {
            Self::NotFound { .. } => LoadFailure::NotFound,
            Self::Io { .. } => LoadFailure::Unreadable,
            Self::Deserialize { .. } => LoadFailure::Corrupt,
        }
    }

    /// Returns `true` when the artifact does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Source of model handles.
///
/// Every call to [`load`] performs a fresh read; implementations must not
/// cache handles between calls.
///
/// [`load`]: ModelLoader::load
pub trait ModelLoader: Send + Sync + 'static {
    /// Returns the location handles are loaded from.
    fn location(&self) -> &Path;

    /// Loads a new, fully constructed model handle.
    ///
    /// This performs blocking I/O.
    fn load(&self) -> Result<ModelHandle, LoadError>;
}

/// Loads [`ModelArtifact`]s stored as JSON files.
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    path: PathBuf,
}

impl ArtifactLoader {
    /// Creates a loader for the artifact at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads and decodes the artifact without wrapping it into a handle.
    pub fn load_artifact(&self) -> Result<ModelArtifact, LoadError> {
        let bytes =
            std::fs::read(&self.path).map_err(|err| LoadError::from_io(&self.path, err))?;

        ModelArtifact::from_slice(&bytes).map_err(|source| LoadError::Deserialize {
            path: self.path.clone(),
            source,
        })
    }
}

impl ModelLoader for ArtifactLoader {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ModelHandle, LoadError> {
        tracing::debug!(
            target: TRACING_TARGET_LOADER,
            path = %self.path.display(),
            "loading model artifact"
        );

        match self.load_artifact() {
            Ok(artifact) => {
                tracing::debug!(
                    target: TRACING_TARGET_LOADER,
                    path = %self.path.display(),
                    algorithm = artifact.algorithm(),
                    "model artifact loaded"
                );
                Ok(ModelHandle::new(artifact))
            }
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_LOADER,
                    path = %self.path.display(),
                    failure = err.failure().as_ref(),
                    error = %err,
                    "model artifact could not be loaded"
                );
                Err(err)
            }
        }
    }
}
