use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A screen rectangle in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }
    pub fn y(&self) -> i32 {
        self.y
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }

    /// ImageMagick crop geometry, e.g. `800x600+100+200`.
    pub fn crop_geometry(&self) -> String {
        format!("{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// One capture: a region and where the result should land.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    region: Region,
    output: PathBuf,
}

impl CaptureRequest {
    pub fn new(region: Region, output: impl Into<PathBuf>) -> Self {
        Self {
            region,
            output: output.into(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

/// Environment-dependent knobs for the portal fallback.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    screenshots_dir: PathBuf,
    portal_delay: Duration,
    convert_cmd: Option<PathBuf>,
}

impl CaptureOptions {
    pub fn new(
        screenshots_dir: impl Into<PathBuf>,
        portal_delay: Duration,
        convert_cmd: Option<PathBuf>,
    ) -> Self {
        Self {
            screenshots_dir: screenshots_dir.into(),
            portal_delay,
            convert_cmd,
        }
    }

    /// Discover defaults from the environment: `WSHOT_SCREENSHOT_DIR` or
    /// `$HOME/Pictures` for the portal's drop directory, a 2 second settle
    /// delay, and ImageMagick's `convert` if it is on PATH.
    pub fn discover() -> Self {
        let screenshots_dir = std::env::var_os("WSHOT_SCREENSHOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("Pictures")
            });

        Self {
            screenshots_dir,
            portal_delay: Duration::from_secs(2),
            convert_cmd: which::which("convert").ok(),
        }
    }

    pub fn screenshots_dir(&self) -> &Path {
        &self.screenshots_dir
    }

    pub fn portal_delay(&self) -> Duration {
        self.portal_delay
    }

    pub fn convert_cmd(&self) -> Option<&Path> {
        self.convert_cmd.as_deref()
    }
}
