//! Request timeouts and panic recovery.
//!
//! Both failure modes are answered with the regular JSON error body, so
//! clients never see a dropped connection.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET_TIMEOUT: &str = "sommelier_server::recovery::timeout";
const TRACING_TARGET_PANIC: &str = "sommelier_server::recovery::panic";

/// Default per-request time budget in seconds.
pub const REQUEST_TIMEOUT: u64 = 30;

/// Per-request time budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may run before it is answered with a 500.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = REQUEST_TIMEOUT)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::with_timeout_secs(REQUEST_TIMEOUT)
    }
}

impl RecoveryConfig {
    /// Budget of `secs` seconds per request.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            request_timeout: secs,
        }
    }

    /// Returns the budget as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Checks that the timeout lies within 1..=300 seconds.
    pub fn validate(&self) -> Result<(), String> {
        match self.request_timeout {
            0 => Err("Request timeout must be at least 1 second".to_string()),
            301.. => Err("Request timeout cannot exceed 300 seconds".to_string()),
            _ => Ok(()),
        }
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Converts handler panics and timed out requests into error responses.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;

    /// [`with_recovery`](Self::with_recovery) using [`REQUEST_TIMEOUT`].
    fn with_default_recovery(self) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        self.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(timeout_error))
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
    }

    fn with_default_recovery(self) -> Self {
        self.with_recovery(&RecoveryConfig::default())
    }
}

async fn timeout_error(err: BoxError) -> Error<'static> {
    if err.is::<Elapsed>() {
        tracing::warn!(target: TRACING_TARGET_TIMEOUT, "request exceeded its time budget");
        return ErrorKind::InternalServerError
            .with_message("Request timeout")
            .with_context("The request took too long to process and was terminated");
    }

    tracing::error!(
        target: TRACING_TARGET_TIMEOUT,
        error = %err,
        "middleware failed"
    );
    ErrorKind::InternalServerError
        .with_message("An unexpected error occurred")
        .with_context(err.to_string())
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    // Handlers may panic with a ready-made error.
    if let Some(error) = payload.downcast_ref::<Error<'static>>() {
        tracing::error!(target: TRACING_TARGET_PANIC, error = %error, "handler panicked");
        return error.clone().into_response();
    }

    tracing::error!(
        target: TRACING_TARGET_PANIC,
        payload = panic_message(payload.as_ref()),
        "handler panicked"
    );
    ErrorKind::InternalServerError
        .with_message("An unexpected panic occurred")
        .into_response()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else {
        "non-string panic payload"
    }
}
