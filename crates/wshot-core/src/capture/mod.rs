//! Screenshot capture orchestration.
//!
//! Tries the non-interactive shell call first, then the permission-gated
//! portal with client-side cropping.

pub mod errors;
pub mod handler;
pub mod types;

pub use errors::CaptureError;
pub use handler::capture_region;
pub use types::{CaptureOptions, CaptureRequest, Region};
