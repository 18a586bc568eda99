//! Inference error type.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Thread-safe boxed error used as an optional cause.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias defaulting to the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Stage of a prediction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Features could not be shaped into the model's input matrix.
    InvalidInput,
    /// The model failed while producing a prediction.
    Inference,
}

/// Failure raised by a [`Regressor`] while predicting.
///
/// Artifact loading failures use [`LoadError`] instead.
///
/// [`Regressor`]: crate::Regressor
/// [`LoadError`]: crate::LoadError
#[derive(Debug, Error)]
#[error("{}{}", kind.as_ref(), message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// Failed stage.
    pub kind: ErrorKind,
    /// Detail suitable for logs and error contexts.
    pub message: Option<String>,
    /// Underlying cause.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates an error of `kind` with no detail.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Input shaping failed.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Prediction failed.
    pub fn inference() -> Self {
        Self::new(ErrorKind::Inference)
    }

    /// Sets the detail message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Sets the underlying cause.
    pub fn with_source(self, source: impl Into<BoxedError>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }

    /// Returns the failed stage.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Snake_case label of the failed stage, for structured logs.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_includes_message() {
        let error = Error::inference().with_message("empty prediction");
        assert_eq!(error.to_string(), "inference: empty prediction");
    }

    #[test]
    fn display_without_message() {
        assert_eq!(Error::invalid_input().to_string(), "invalid_input");
    }

    #[test]
    fn source_is_attached() {
        let error = Error::inference().with_source(std::io::Error::other("disk on fire"));
        assert!(error.source().is_some());
    }

    #[test]
    fn kind_as_snake_case() {
        assert_eq!(Error::invalid_input().kind_str(), "invalid_input");
        assert_eq!(ErrorKind::Inference.as_ref(), "inference");
    }
}
