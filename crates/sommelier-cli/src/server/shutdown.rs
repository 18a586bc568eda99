//! Graceful shutdown signal handling.

use std::future::pending;
use std::time::Duration;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves once the process receives SIGINT or, on Unix, SIGTERM.
///
/// A signal whose handler cannot be installed is ignored rather than treated
/// as received.
pub async fn shutdown_signal(shutdown_timeout: Duration) {
    let signal = tokio::select! {
        () = interrupt() => "SIGINT",
        () = terminate() => "SIGTERM",
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal,
        timeout_secs = shutdown_timeout.as_secs(),
        "Shutdown signal received, draining in-flight requests"
    );
}

async fn interrupt() {
    if let Err(err) = ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %err,
            "Cannot listen for SIGINT"
        );
        pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                "Cannot listen for SIGTERM"
            );
            pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    pending::<()>().await;
}
