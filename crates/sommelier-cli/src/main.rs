#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use sommelier_server::handler::router;
use sommelier_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use sommelier_server::service::{ServiceConfig, ServiceState};

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "sommelier_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "sommelier_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "sommelier_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting sommelier server"
    );

    cli.log();
    cli.validate()?;

    let state = create_service_state(&cli.service).await?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;
    Ok(())
}

/// Loads the model artifact; a missing or unreadable model aborts startup.
async fn create_service_state(config: &ServiceConfig) -> anyhow::Result<ServiceState> {
    ServiceState::from_config(config)
        .await
        .with_context(|| format!("failed to load model from '{}'", config.model_path.display()))
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS, body limit, response headers
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    router(state, &middleware.openapi)
        .with_security(&middleware.cors, &middleware.body_limit)
        .with_observability()
        .with_recovery(&middleware.recovery)
}

#[cfg(test)]
mod tests {
    use sommelier_server::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn missing_model_aborts_startup() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = ServiceConfig::builder()
            .with_model_path(dir.path().join("absent.json"))
            .build()?;

        let error = create_service_state(&config).await.unwrap_err();
        let source = error
            .downcast_ref::<sommelier_server::Error>()
            .expect("service error is preserved");

        assert_eq!(source.kind(), ErrorKind::ModelNotFound);
        assert!(format!("{error:#}").contains("absent.json"));
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_model_aborts_startup() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"{\"algorithm\":\"unknown\"}")?;

        let config = ServiceConfig::builder().with_model_path(path).build()?;
        let error = create_service_state(&config).await.unwrap_err();
        let source = error
            .downcast_ref::<sommelier_server::Error>()
            .expect("service error is preserved");

        assert_eq!(source.kind(), ErrorKind::ModelLoad);
        Ok(())
    }
}
