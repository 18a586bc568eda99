//! Model error to HTTP error conversion implementation.
//!
//! Inference failures are unexpected and become `500 Internal Server Error`.

use sommelier_core::ErrorKind as CoreErrorKind;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for model error conversions.
const TRACING_TARGET: &str = "sommelier_server::handler::model";

impl From<sommelier_core::Error> for HttpError<'static> {
    fn from(error: sommelier_core::Error) -> Self {
        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            error_kind = error.kind_str(),
            "Model operation failed"
        );

        let message = match error.kind() {
            CoreErrorKind::InvalidInput => "Input could not be prepared for the model",
            CoreErrorKind::Inference => "Prediction failed",
        };

        let http_error = ErrorKind::InternalServerError
            .with_message(message)
            .with_resource("model");

        match error.message {
            Some(description) => http_error.with_context(description),
            None => http_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_failure_is_internal() {
        let error = HttpError::from(
            sommelier_core::Error::inference().with_message("random_forest failed"),
        );

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), Some("Prediction failed"));
        assert_eq!(error.context(), Some("random_forest failed"));
    }
}
