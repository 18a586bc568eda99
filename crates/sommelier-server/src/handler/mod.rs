//! HTTP handlers and the routes that expose them.
//!
//! | method | path           | handler                       |
//! |--------|----------------|-------------------------------|
//! | `POST` | `/predict`     | scores one wine sample        |
//! | `GET`  | `/healthcheck` | reloads the model artifact    |
//!
//! Any other path responds with `404` and the standard [`ErrorResponse`] body.

mod error;
mod monitors;
mod predictions;
pub mod request;
pub mod response;

use aide::axum::ApiRouter;
use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::middleware::{OpenApiConfig, RouterOpenApiExt};
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns all documented API routes.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(predictions::routes())
        .merge(monitors::routes())
}

/// Builds the application router with OpenAPI documentation and state.
///
/// Middleware is not applied here; see [`middleware`].
///
/// [`middleware`]: crate::middleware
pub fn router(state: ServiceState, open_api: &OpenApiConfig) -> Router {
    routes()
        .with_open_api(open_api)
        .fallback(fallback)
        .with_state(state)
}
