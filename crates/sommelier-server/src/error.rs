//! Errors raised while assembling the service.
//!
//! They describe failures while assembling the service (configuration
//! and model initialization). Failures while serving a request are reported
//! through [`handler::Error`] instead.
//!
//! [`handler::Error`]: crate::handler::Error

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use sommelier_core::LoadError;

/// Boxed error cause.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result of service assembly and model probes.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What went wrong while assembling the service or probing the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid configuration value.
    Config,
    /// The model artifact does not exist.
    ModelNotFound,
    /// The model artifact exists but could not be loaded.
    ModelLoad,
    /// Failure outside the model itself, e.g. a crashed worker task.
    Internal,
}

impl ErrorKind {
    /// Snake_case label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::ModelNotFound => "model_not_found",
            Self::ModelLoad => "model_load",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service assembly error with its kind, a message and an optional cause.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Records the underlying cause.
    pub fn with_source(self, source: impl Into<BoxedError>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Invalid configuration value.
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Failure outside the model itself.
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        let kind = if err.is_not_found() {
            ErrorKind::ModelNotFound
        } else {
            ErrorKind::ModelLoad
        };

        Self::new(kind, err.to_string()).with_source(err)
    }
}
