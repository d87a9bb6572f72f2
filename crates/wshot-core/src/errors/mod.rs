//! Crate-wide error conventions.
//!
//! Every domain error type implements [`WshotError`] so the CLI layer can
//! report a stable machine-readable code alongside the human message.

/// Common behavior for wshot error types.
pub trait WshotError: std::error::Error {
    /// Stable, uppercase error code for structured logs and scripting.
    fn error_code(&self) -> &'static str;

    /// Whether the error is caused by user input or environment (as opposed
    /// to an internal failure).
    fn is_user_error(&self) -> bool;
}
