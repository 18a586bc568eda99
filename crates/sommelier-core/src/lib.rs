#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for model loading operations.
pub const TRACING_TARGET_LOADER: &str = "sommelier_core::loader";

/// Tracing target for inference operations.
pub const TRACING_TARGET_INFERENCE: &str = "sommelier_core::inference";

mod error;
mod features;

pub mod model;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, WineFeatures};
pub use model::{
    ArtifactLoader, LoadError, LoadFailure, LoadStatus, ModelArtifact, ModelHandle, ModelLoader,
    Regressor,
};
