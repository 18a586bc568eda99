//! Response types for HTTP handlers.

mod errors;
mod monitors;
mod predictions;

pub use errors::*;
pub use monitors::*;
pub use predictions::*;
