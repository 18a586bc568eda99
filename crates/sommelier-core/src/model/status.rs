use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::model::LoadError;

/// Why a model artifact could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoadFailure {
    /// Nothing exists at the configured location.
    NotFound,
    /// The artifact exists but could not be read.
    Unreadable,
    /// The artifact was read but does not decode into a model.
    Corrupt,
}

/// Outcome of the most recent attempt to load a model artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load has been attempted yet.
    #[default]
    NotAttempted,
    /// The artifact loaded into a usable model.
    Loaded,
    /// The artifact could not be loaded.
    Failed {
        /// Failure class.
        failure: LoadFailure,
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl LoadStatus {
    /// Summarizes the outcome of a load attempt.
    pub fn from_outcome<T>(outcome: &Result<T, LoadError>) -> Self {
        match outcome {
            Ok(_) => Self::Loaded,
            Err(err) => Self::from(err),
        }
    }

    /// Returns `true` if the last attempt produced a usable model.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Returns the failure class, if the last attempt failed.
    #[must_use]
    pub const fn failure(&self) -> Option<LoadFailure> {
        match self {
            Self::Failed { failure, .. } => Some(*failure),
            Self::NotAttempted | Self::Loaded => None,
        }
    }

    /// Returns the failure description, if the last attempt failed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Failed { reason, .. } => Some(reason),
            Self::NotAttempted | Self::Loaded => None,
        }
    }

    /// Returns a stable snake_case label for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotAttempted => "not_attempted",
            Self::Loaded => "loaded",
            Self::Failed { .. } => "failed",
        }
    }
}

impl From<&LoadError> for LoadStatus {
    fn from(err: &LoadError) -> Self {
        Self::Failed {
            failure: err.failure(),
            reason: err.to_string(),
        }
    }
}
