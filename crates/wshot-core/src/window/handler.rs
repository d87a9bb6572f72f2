use serde_json::Value;
use tracing::{debug, info, warn};

use crate::bus::{Bus, BusCall, extract_json};

use super::errors::WindowError;
use super::types::{WindowInfo, WindowQuery};

/// Install page for the Window Calls extension.
pub const EXTENSION_URL: &str = "https://extensions.gnome.org/extension/4724/window-calls/";

const SHELL_DEST: &str = "org.gnome.Shell";
const WINDOWS_PATH: &str = "/org/gnome/Shell/Extensions/Windows";
const LIST_METHOD: &str = "org.gnome.Shell.Extensions.Windows.List";
const FRAME_RECT_METHOD: &str = "org.gnome.Shell.Extensions.Windows.GetFrameRect";

fn list_call() -> BusCall {
    BusCall::new(SHELL_DEST, WINDOWS_PATH, LIST_METHOD)
}

/// Check that the Window Calls extension answers on the bus.
///
/// The extension is a third-party add-on; without it there is nothing to
/// enumerate and callers should fail fast with [`WindowError::ExtensionMissing`].
pub fn extension_available(bus: &dyn Bus) -> bool {
    match bus.call(&list_call()) {
        Ok(reply) if !reply.trim().is_empty() => true,
        Ok(_) => {
            warn!(event = "core.window.extension_empty_reply");
            false
        }
        Err(e) => {
            warn!(event = "core.window.extension_probe_failed", error = %e);
            false
        }
    }
}

/// List all open windows with their frame rectangles.
///
/// Merges the extension's `List` entries with one `GetFrameRect` call per
/// window. Bus failures and unparseable replies degrade to an empty list; a
/// failed rect lookup yields zeroed geometry rather than a dropped record.
/// Order is whatever the shell reports, and is not guaranteed stable.
pub fn list_windows(bus: &dyn Bus) -> Vec<WindowInfo> {
    info!(event = "core.window.list_started");

    let reply = match bus.call(&list_call()) {
        Ok(reply) => reply,
        Err(e) => {
            warn!(event = "core.window.list_failed", error = %e);
            return Vec::new();
        }
    };

    let Some(Value::Array(entries)) = extract_json(&reply) else {
        warn!(event = "core.window.list_unparseable", reply_len = reply.len());
        return Vec::new();
    };

    let mut skipped_count = 0;
    let result: Vec<WindowInfo> = entries
        .iter()
        .filter_map(|entry| {
            let Some(id) = entry.get("id").and_then(Value::as_u64) else {
                debug!(event = "core.window.entry_missing_id");
                skipped_count += 1;
                return None;
            };

            let app = entry
                .get("wm_class")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let title = entry
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let pid = entry.get("pid").and_then(Value::as_i64).map(|p| p as i32);
            let focused = entry
                .get("focus")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            let rect = frame_rect(bus, id);
            let x = rect.get("x").and_then(Value::as_i64).unwrap_or(0) as i32;
            let y = rect.get("y").and_then(Value::as_i64).unwrap_or(0) as i32;
            let width = rect.get("width").and_then(Value::as_u64).unwrap_or(0) as u32;
            let height = rect.get("height").and_then(Value::as_u64).unwrap_or(0) as u32;

            Some(WindowInfo::new(
                id, app, title, pid, x, y, width, height, focused,
            ))
        })
        .collect();

    if skipped_count > 0 {
        warn!(
            event = "core.window.list_incomplete",
            skipped_count = skipped_count,
            returned_count = result.len()
        );
    }

    info!(event = "core.window.list_completed", count = result.len());
    result
}

/// Fetch a window's frame rectangle, falling back to an empty object.
fn frame_rect(bus: &dyn Bus, id: u64) -> Value {
    let call = BusCall::new(SHELL_DEST, WINDOWS_PATH, FRAME_RECT_METHOD).arg(id);
    match bus.call(&call) {
        Ok(reply) => extract_json(&reply).unwrap_or_else(|| {
            debug!(event = "core.window.frame_rect_unparseable", window_id = id);
            Value::Object(Default::default())
        }),
        Err(e) => {
            debug!(event = "core.window.frame_rect_failed", window_id = id, error = %e);
            Value::Object(Default::default())
        }
    }
}

/// Select the first window matching the query, in enumeration order.
pub fn select<'a>(
    windows: &'a [WindowInfo],
    query: &WindowQuery,
) -> Result<&'a WindowInfo, WindowError> {
    info!(event = "core.window.select_started", target = %query.target());

    let window = windows
        .iter()
        .find(|w| query.matches(w))
        .ok_or_else(|| WindowError::NoMatch {
            target: query.target(),
        })?;

    info!(
        event = "core.window.select_completed",
        window_id = window.id(),
        app = window.app()
    );
    Ok(window)
}
