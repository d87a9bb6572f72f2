use std::path::PathBuf;

use crate::errors::WshotError;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("No portal screenshot found in {}", dir.display())]
    NoPortalScreenshot { dir: PathBuf },

    #[error("Failed to move {} to {}: {message}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    #[error("Screenshot failed: output file {} was not produced", path.display())]
    OutputMissing { path: PathBuf },
}

impl WshotError for CaptureError {
    fn error_code(&self) -> &'static str {
        match self {
            CaptureError::NoPortalScreenshot { .. } => "CAPTURE_NO_PORTAL_SCREENSHOT",
            CaptureError::MoveFailed { .. } => "CAPTURE_MOVE_FAILED",
            CaptureError::OutputMissing { .. } => "CAPTURE_OUTPUT_MISSING",
        }
    }

    fn is_user_error(&self) -> bool {
        // All three mean the interactive capture did not complete (e.g. the
        // user dismissed the portal dialog) or the environment is off.
        matches!(self, CaptureError::NoPortalScreenshot { .. })
    }
}
