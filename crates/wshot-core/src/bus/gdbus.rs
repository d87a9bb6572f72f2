//! Real session-bus backend shelling out to `gdbus`.
//!
//! `gdbus call` inherits the user's session bus address from the
//! environment, so no D-Bus client library or connection setup is needed.
//! Each call is a fresh subprocess with a hard deadline; a child that
//! overruns it is killed.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::errors::BusError;
use super::types::{Bus, BusCall};

/// Default per-call deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct GdbusBus {
    timeout: Duration,
}

impl GdbusBus {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for GdbusBus {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Bus for GdbusBus {
    fn call(&self, call: &BusCall) -> Result<String, BusError> {
        info!(
            event = "core.bus.call_started",
            dest = call.dest(),
            method = call.method()
        );

        let mut cmd = Command::new("gdbus");
        cmd.args(["call", "--session"])
            .args(["--dest", call.dest()])
            .args(["--object-path", call.path()])
            .args(["--method", call.method()])
            .args(call.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| BusError::SpawnFailed {
            message: e.to_string(),
        })?;

        // Poll instead of blocking so the deadline can be enforced. Replies
        // are small (a few KiB of GVariant text), well under the pipe buffer,
        // so deferring the read until exit cannot deadlock.
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        warn!(
                            event = "core.bus.call_timeout",
                            method = call.method(),
                            timeout_ms = self.timeout.as_millis() as u64
                        );
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(BusError::Timeout {
                            method: call.method().to_string(),
                            timeout_ms: self.timeout.as_millis() as u64,
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    return Err(BusError::CallFailed {
                        method: call.method().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| BusError::CallFailed {
                method: call.method().to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                event = "core.bus.call_failed",
                method = call.method(),
                stderr = %stderr.trim()
            );
            return Err(BusError::CallFailed {
                method: call.method().to_string(),
                message: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| BusError::NonUtf8Output {
            method: call.method().to_string(),
        })?;

        info!(
            event = "core.bus.call_completed",
            method = call.method(),
            reply_len = stdout.len()
        );
        Ok(stdout)
    }
}
