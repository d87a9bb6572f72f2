use serde::{Deserialize, Serialize};

use crate::capture::Region;

/// One on-screen window, merged from the extension's `List` entry and its
/// `GetFrameRect` reply.
///
/// Serializes with the compact wire keys the CLI prints (`w`/`h` for the
/// dimensions). Reconstructed fresh on every listing; ids are assumed unique
/// within one listing only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    id: u64,
    app: String,
    title: String,
    pid: Option<i32>,
    x: i32,
    y: i32,
    #[serde(rename = "w")]
    width: u32,
    #[serde(rename = "h")]
    height: u32,
    focused: bool,
}

impl WindowInfo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        app: String,
        title: String,
        pid: Option<i32>,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        focused: bool,
    ) -> Self {
        Self {
            id,
            app,
            title,
            pid,
            x,
            y,
            width,
            height,
            focused,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn app(&self) -> &str {
        &self.app
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn pid(&self) -> Option<i32> {
        self.pid
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
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// The window's frame rectangle as a capture region.
    pub fn region(&self) -> Region {
        Region::new(self.x, self.y, self.width, self.height)
    }
}

/// How to pick a window out of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowQuery {
    /// Exact process id match.
    Pid(i32),
    /// Exact window id match.
    Id(u64),
    /// Case-insensitive substring of the title.
    Title(String),
    /// Case-insensitive substring of the application (WM class) name.
    App(String),
}

impl WindowQuery {
    /// Whether the window satisfies this query.
    pub fn matches(&self, window: &WindowInfo) -> bool {
        match self {
            WindowQuery::Pid(pid) => window.pid() == Some(*pid),
            WindowQuery::Id(id) => window.id() == *id,
            WindowQuery::Title(needle) => window
                .title()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            WindowQuery::App(needle) => {
                window.app().to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }

    /// The user-supplied target value, for error messages.
    pub fn target(&self) -> String {
        match self {
            WindowQuery::Pid(pid) => pid.to_string(),
            WindowQuery::Id(id) => id.to_string(),
            WindowQuery::Title(s) | WindowQuery::App(s) => s.clone(),
        }
    }
}
