//! Request extractors with consistent error responses.
//!
//! - [`Json`] - JSON deserialization whose rejections render as [`ErrorResponse`]
//! - [`ValidateJson`] - [`Json`] followed by `validator` checks
//!
//! [`ErrorResponse`]: crate::handler::response::ErrorResponse

mod reject;

pub use reject::{Json, ValidateJson};
