//! Middleware configuration for the HTTP server.
//!
//! All middleware configs are defined in `sommelier-server` and support
//! both CLI arguments and environment variables.
//!
//! # Example
//!
//! ```bash
//! sommelier --cors-origins "https://example.com" --request-timeout 60
//! ```

use anyhow::anyhow;
use clap::Args;
use serde::{Deserialize, Serialize};
use sommelier_server::middleware::{BodyLimitConfig, CorsConfig, OpenApiConfig, RecoveryConfig};

use crate::TRACING_TARGET_CONFIG;

/// Middleware configuration combining CORS, body limits, OpenAPI and recovery.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Cross-origin access to the API.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Maximum accepted request body size.
    #[clap(flatten)]
    pub body_limit: BodyLimitConfig,

    /// Paths of the OpenAPI document and Scalar UI.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    /// Request timeout and panic recovery.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Validates middleware settings.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.recovery.validate().map_err(|err| anyhow!(err))?;

        if self.body_limit.max_body_size == 0 {
            return Err(anyhow!("Maximum body size must be greater than zero"));
        }

        Ok(())
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            max_age_secs = self.cors.max_age_seconds,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            max_body_size = self.body_limit.max_body_size,
            request_timeout_secs = self.recovery.request_timeout,
            "Request limits"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "OpenAPI configuration"
        );
    }
}
