//! Handler error carrying the kind of response and optional details.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Error returned by every handler and extractor.
///
/// Every non-2xx response produced by the service is rendered from this type,
/// so clients always receive the same [`ErrorResponse`] body. Unset details
/// fall back to the defaults of the [`ErrorKind`].
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
}

impl<'a> Error<'a> {
    /// Creates an error that renders the defaults of `kind`.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            resource: None,
            context: None,
        }
    }

    /// Replaces the user-facing message.
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Names what the error is about, e.g. `model` or `request`.
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Adds a detail string for the client, e.g. the failing field.
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Returns the response class.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message override, if set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the resource, if set.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns the client-facing detail, if set.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = self.kind.response();
        let message = self.message().unwrap_or(&defaults.message);
        write!(f, "{} {message}", defaults.status.as_u16())?;

        match (self.resource(), self.context()) {
            (Some(resource), Some(context)) => write!(f, " ({resource}: {context})"),
            (Some(detail), None) | (None, Some(detail)) => write!(f, " ({detail})"),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut body = self.kind.response();
        if let Some(message) = self.message {
            body = body.with_message(message);
        }
        if let Some(resource) = self.resource {
            body = body.with_resource(resource);
        }
        if let Some(context) = self.context {
            body = body.with_context(context);
        }

        body.into_response()
    }
}

impl aide::OperationOutput for Error<'_> {
    type Inner = ErrorResponse<'static>;
}

impl From<ErrorKind> for Error<'static> {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result of a handler.
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Response classes the service produces.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400, malformed or invalid request body.
    BadRequest,
    /// 404, unknown route.
    NotFound,
    /// 413, body over the configured limit.
    PayloadTooLarge,
    /// 500, unexpected server failure.
    InternalServerError,
    /// 503, the model artifact cannot currently be loaded.
    ServiceUnavailable,
}

impl ErrorKind {
    /// Shorthand for `Error::new(kind).with_message(..)`.
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Shorthand for `Error::new(kind).with_resource(..)`.
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    /// Shorthand for `Error::new(kind).with_context(..)`.
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// HTTP status sent for this kind.
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Body sent when no detail overrides the defaults.
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::PayloadTooLarge => ErrorResponse::PAYLOAD_TOO_LARGE,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}
