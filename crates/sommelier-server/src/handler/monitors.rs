//! Service health monitoring handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{ErrorResponse, HealthStatus};
use crate::service::{ModelProvider, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "sommelier_server::handler::monitors";

/// Reports whether the model artifact can currently be loaded.
///
/// Every call reads the artifact again. The model serving predictions is left
/// untouched whatever the outcome.
#[tracing::instrument(skip_all)]
async fn health_check(
    State(provider): State<ModelProvider>,
) -> Result<(StatusCode, Json<HealthStatus>)> {
    tracing::debug!(
        target: TRACING_TARGET,
        path = %provider.location().display(),
        "Health check requested"
    );

    provider.probe().await?;

    tracing::debug!(target: TRACING_TARGET, "Model artifact is loadable");

    Ok((StatusCode::OK, Json(HealthStatus::healthy())))
}

fn health_check_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Check service health")
        .description(
            "Loads the model artifact from storage. Responds with 503 when the \
            artifact is missing or cannot be loaded.",
        )
        .response::<200, Json<HealthStatus>>()
        .response::<500, Json<ErrorResponse<'static>>>()
        .response::<503, Json<ErrorResponse<'static>>>()
}

/// Returns routes for service health monitoring.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/healthcheck", get_with(health_check, health_check_docs))
        .with_path_items(|item| item.tag("monitors"))
}
