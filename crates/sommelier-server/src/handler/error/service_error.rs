//! Service error to HTTP error conversion implementation.

use super::http_error::{Error as HttpError, ErrorKind};
use crate::ErrorKind as ServiceErrorKind;

/// Tracing target for service error conversions.
const TRACING_TARGET: &str = "sommelier_server::handler::service";

impl From<crate::Error> for HttpError<'static> {
    fn from(error: crate::Error) -> Self {
        match error.kind() {
            ServiceErrorKind::ModelNotFound => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Model artifact not found"
                );

                ErrorKind::ServiceUnavailable
                    .with_message("Model is not found")
                    .with_resource("model")
                    .with_context(error.message().to_owned())
            }
            ServiceErrorKind::ModelLoad => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Model artifact could not be loaded"
                );

                ErrorKind::ServiceUnavailable
                    .with_message("Model could not be loaded")
                    .with_resource("model")
                    .with_context(error.message().to_owned())
            }
            ServiceErrorKind::Config | ServiceErrorKind::Internal => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind(),
                    "Service operation failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Unexpected error")
                    .with_context(error.message().to_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sommelier_core::LoadError;

    use super::*;

    #[test]
    fn missing_model_is_unavailable() {
        let error = HttpError::from(crate::Error::from(LoadError::NotFound {
            path: PathBuf::from("/srv/model.json"),
        }));

        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(error.message(), Some("Model is not found"));
        assert!(error.context().unwrap().contains("/srv/model.json"));
    }

    #[test]
    fn corrupt_model_has_distinct_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = HttpError::from(crate::Error::from(LoadError::Deserialize {
            path: PathBuf::from("/srv/model.json"),
            source,
        }));

        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(error.message(), Some("Model could not be loaded"));
    }

    #[test]
    fn internal_failure_is_server_error() {
        let error = HttpError::from(crate::Error::internal("model load task failed"));

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.context(), Some("model load task failed"));
    }
}
