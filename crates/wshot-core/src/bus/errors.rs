use crate::errors::WshotError;

#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("Failed to spawn gdbus: {message}")]
    SpawnFailed { message: String },

    #[error("Bus call '{method}' timed out after {timeout_ms}ms")]
    Timeout { method: String, timeout_ms: u64 },

    #[error("Bus call '{method}' failed: {message}")]
    CallFailed { method: String, message: String },

    #[error("Bus call '{method}' returned non-UTF-8 output")]
    NonUtf8Output { method: String },
}

impl WshotError for BusError {
    fn error_code(&self) -> &'static str {
        match self {
            BusError::SpawnFailed { .. } => "BUS_SPAWN_FAILED",
            BusError::Timeout { .. } => "BUS_TIMEOUT",
            BusError::CallFailed { .. } => "BUS_CALL_FAILED",
            BusError::NonUtf8Output { .. } => "BUS_NON_UTF8_OUTPUT",
        }
    }

    fn is_user_error(&self) -> bool {
        // Spawn failure usually means gdbus is not installed; the rest are
        // environment or shell-side failures.
        matches!(self, BusError::SpawnFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_failed_error() {
        let error = BusError::SpawnFailed {
            message: "No such file or directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to spawn gdbus: No such file or directory"
        );
        assert_eq!(error.error_code(), "BUS_SPAWN_FAILED");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_timeout_error() {
        let error = BusError::Timeout {
            method: "org.gnome.Shell.Extensions.Windows.List".to_string(),
            timeout_ms: 10000,
        };
        assert_eq!(
            error.to_string(),
            "Bus call 'org.gnome.Shell.Extensions.Windows.List' timed out after 10000ms"
        );
        assert_eq!(error.error_code(), "BUS_TIMEOUT");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_call_failed_error() {
        let error = BusError::CallFailed {
            method: "org.gnome.Shell.Screenshot.ScreenshotArea".to_string(),
            message: "access denied".to_string(),
        };
        assert!(error.to_string().contains("access denied"));
        assert_eq!(error.error_code(), "BUS_CALL_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BusError>();
    }
}
