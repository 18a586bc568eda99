//! Middleware for `axum::Router` and HTTP request processing.
//!
//! The router is wrapped in the following order, outermost first:
//!
//! ```text
//! recovery        panics, request timeouts, tower errors
//! └── observability   trace spans, request ids, sensitive headers
//!     └── security        CORS, response headers, body size limit
//!         └── routes
//! ```

mod observability;
mod open_api;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use open_api::{OpenApiConfig, RouterOpenApiExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{BodyLimitConfig, CorsConfig, RouterSecurityExt};
