use crate::errors::WshotError;

use super::handler::EXTENSION_URL;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Window Calls extension required: {EXTENSION_URL}")]
    ExtensionMissing,

    #[error("No windows found")]
    NoWindows,

    #[error("No match for '{target}'")]
    NoMatch { target: String },
}

impl WshotError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::ExtensionMissing => "WINDOW_EXTENSION_MISSING",
            WindowError::NoWindows => "WINDOW_NONE_FOUND",
            WindowError::NoMatch { .. } => "WINDOW_NO_MATCH",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
