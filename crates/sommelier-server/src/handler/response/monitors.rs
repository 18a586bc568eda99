//! Monitor response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Status message reported when the model artifact is loadable.
pub const HEALTHY_STATUS: &str = "All good";

/// Service health status response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Human-readable health summary.
    pub status: String,
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Application version.
    pub version: String,
}

impl HealthStatus {
    /// Creates a healthy status stamped with the current time.
    pub fn healthy() -> Self {
        Self {
            status: HEALTHY_STATUS.to_owned(),
            checked_at: Timestamp::now(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
