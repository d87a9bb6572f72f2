use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::bus::{Bus, BusCall};

use super::errors::CaptureError;
use super::types::{CaptureOptions, CaptureRequest};

const SHELL_DEST: &str = "org.gnome.Shell";
const SCREENSHOT_PATH: &str = "/org/gnome/Shell/Screenshot";
const SCREENSHOT_AREA_METHOD: &str = "org.gnome.Shell.Screenshot.ScreenshotArea";

const PORTAL_DEST: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const PORTAL_SCREENSHOT_METHOD: &str = "org.freedesktop.portal.Screenshot.Screenshot";

/// Capture a screen region to the request's output path.
///
/// The direct `ScreenshotArea` call is non-interactive but GNOME may refuse
/// it for terminal-launched processes. On refusal, fall back to the
/// screenshot portal: the user confirms in a dialog, the portal drops a file
/// into the screenshots directory, and the file is cropped (or moved
/// uncropped when ImageMagick is unavailable) into place.
pub fn capture_region(
    bus: &dyn Bus,
    request: &CaptureRequest,
    options: &CaptureOptions,
) -> Result<(), CaptureError> {
    info!(
        event = "core.capture.started",
        geometry = %request.region().crop_geometry(),
        output = %request.output().display()
    );

    if capture_direct(bus, request) {
        info!(event = "core.capture.direct_completed");
        return Ok(());
    }

    capture_via_portal(bus, request, options)
}

/// Non-interactive capture. Success is signalled by a `(true,` reply.
fn capture_direct(bus: &dyn Bus, request: &CaptureRequest) -> bool {
    let region = request.region();
    let call = BusCall::new(SHELL_DEST, SCREENSHOT_PATH, SCREENSHOT_AREA_METHOD)
        .arg(region.x())
        .arg(region.y())
        .arg(region.width())
        .arg(region.height())
        .arg("false")
        .arg(request.output().display());

    match bus.call(&call) {
        Ok(reply) => reply.contains("(true,"),
        Err(e) => {
            debug!(event = "core.capture.direct_failed", error = %e);
            false
        }
    }
}

/// Interactive portal fallback.
fn capture_via_portal(
    bus: &dyn Bus,
    request: &CaptureRequest,
    options: &CaptureOptions,
) -> Result<(), CaptureError> {
    info!(event = "core.capture.portal_started");
    eprintln!("Click 'Share' in the GNOME dialog...");

    // The portal replies with a request handle, not the file path; the file
    // lands in the screenshots directory. Errors here are not fatal, the
    // filesystem poll below decides the outcome.
    let call = BusCall::new(PORTAL_DEST, PORTAL_PATH, PORTAL_SCREENSHOT_METHOD)
        .arg("")
        .arg("{}");
    if let Err(e) = bus.call(&call) {
        warn!(event = "core.capture.portal_call_failed", error = %e);
    }

    std::thread::sleep(options.portal_delay());

    let source = newest_portal_screenshot(options.screenshots_dir()).ok_or_else(|| {
        CaptureError::NoPortalScreenshot {
            dir: options.screenshots_dir().to_path_buf(),
        }
    })?;

    match options.convert_cmd() {
        Some(convert) => crop_into_place(convert, &source, request),
        None => move_into_place(&source, request.output())?,
    }

    if request.output().exists() {
        info!(
            event = "core.capture.portal_completed",
            output = %request.output().display()
        );
        Ok(())
    } else {
        Err(CaptureError::OutputMissing {
            path: request.output().to_path_buf(),
        })
    }
}

/// Most recently modified `Screenshot*.png` in the portal's drop directory.
fn newest_portal_screenshot(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;

    entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let name = entry.file_name();
            let name = name.to_str()?;
            if !name.starts_with("Screenshot") || !name.ends_with(".png") {
                return None;
            }
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((modified, entry.path()))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}

/// Crop the portal screenshot to the requested region with ImageMagick.
///
/// The uncropped original is always deleted; the caller's existence check on
/// the output path decides success.
fn crop_into_place(convert: &Path, source: &Path, request: &CaptureRequest) {
    let geometry = request.region().crop_geometry();
    let result = Command::new(convert)
        .arg(source)
        .args(["-crop", &geometry, "+repage"])
        .arg(request.output())
        .output();

    match result {
        Ok(output) if output.status.success() => {
            info!(event = "core.capture.crop_completed", geometry = %geometry);
        }
        Ok(output) => {
            warn!(
                event = "core.capture.crop_failed",
                stderr = %String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Err(e) => {
            warn!(event = "core.capture.crop_failed", error = %e);
        }
    }

    if let Err(e) = fs::remove_file(source) {
        warn!(
            event = "core.capture.portal_file_remove_failed",
            path = %source.display(),
            error = %e
        );
    }
}

/// Move the uncropped portal screenshot to the output path.
///
/// Rename first; fall back to copy + remove when source and destination are
/// on different filesystems.
fn move_into_place(source: &Path, output: &Path) -> Result<(), CaptureError> {
    if fs::rename(source, output).is_ok() {
        return Ok(());
    }

    fs::copy(source, output).map_err(|e| CaptureError::MoveFailed {
        from: source.to_path_buf(),
        to: output.to_path_buf(),
        message: e.to_string(),
    })?;
    if let Err(e) = fs::remove_file(source) {
        warn!(
            event = "core.capture.portal_file_remove_failed",
            path = %source.display(),
            error = %e
        );
    }
    Ok(())
}
