//! Model handles, serialized artifacts and the loaders that read them.
//!
//! A model is only ever observed through [`ModelHandle`], an immutable and
//! cheaply cloneable reference to something implementing [`Regressor`].
//! Handles are produced by a [`ModelLoader`], normally [`ArtifactLoader`],
//! which reads a [`ModelArtifact`] from a fixed location on disk.

mod artifact;
mod handle;
mod loader;
mod status;

pub use artifact::ModelArtifact;
pub use handle::{ModelHandle, Regressor};
pub use loader::{ArtifactLoader, LoadError, ModelLoader};
pub use status::{LoadFailure, LoadStatus};
