//! Request types for HTTP handlers.

mod coerce;
mod predictions;

pub use predictions::PredictionRequest;
