//! Prediction response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Quality score predicted for one wine sample.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Prediction {
    /// Predicted quality score.
    pub result: f64,
}

impl From<f64> for Prediction {
    #[inline]
    fn from(result: f64) -> Self {
        Self { result }
    }
}
