use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::Command;

use clap::ArgMatches;
use tracing::{error, info, warn};

use wshot_core::bus::{Bus, DEFAULT_TIMEOUT, GdbusBus};
use wshot_core::capture::{CaptureOptions, CaptureRequest, capture_region};
use wshot_core::events;
use wshot_core::window::{
    EXTENSION_URL, WindowError, WindowInfo, WindowQuery, extension_available, list_windows, select,
};

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let bus = GdbusBus::new(DEFAULT_TIMEOUT);

    match matches.subcommand() {
        Some(("list", sub_matches)) => handle_list_command(&bus, sub_matches),
        Some(("capture", sub_matches)) => handle_capture_command(&bus, sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

fn handle_list_command(
    bus: &dyn Bus,
    _matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.list_started");

    require_extension(bus)?;

    let windows = list_windows(bus);
    println!("{}", serde_json::to_string_pretty(&windows)?);

    info!(event = "cli.list_completed", count = windows.len());
    Ok(())
}

fn handle_capture_command(
    bus: &dyn Bus,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = selector_query(matches);
    let output = PathBuf::from(matches.get_one::<String>("output").expect("has default"));

    info!(
        event = "cli.capture_started",
        target = %query.target(),
        output = %output.display()
    );

    require_extension(bus)?;

    let windows = list_windows(bus);
    if windows.is_empty() {
        let e = WindowError::NoWindows;
        eprintln!("{e}");
        error!(event = "cli.capture_failed", error = %e);
        events::log_app_error(&e);
        return Err(e.into());
    }

    let window = match select(&windows, &query) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("{e}. Available:");
            print_candidates(&windows);
            error!(event = "cli.capture_no_match", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    info!(
        event = "cli.capture_window_selected",
        id = window.id(),
        app = window.app()
    );

    let request = CaptureRequest::new(window.region(), &output);
    let options = CaptureOptions::discover();

    match capture_region(bus, &request, &options) {
        Ok(()) => {
            println!("{}", output.display());
            info!(event = "cli.capture_completed", output = %output.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("Capture failed: {}", e);
            error!(event = "cli.capture_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Build the window query from the parsed selector group.
///
/// clap guarantees exactly one selector is present.
fn selector_query(matches: &ArgMatches) -> WindowQuery {
    if let Some(pid) = matches.get_one::<i32>("pid") {
        WindowQuery::Pid(*pid)
    } else if let Some(id) = matches.get_one::<u64>("id") {
        WindowQuery::Id(*id)
    } else if let Some(title) = matches.get_one::<String>("title") {
        WindowQuery::Title(title.clone())
    } else {
        let app = matches.get_one::<String>("app").expect("selector required");
        WindowQuery::App(app.clone())
    }
}

/// Gate every command on the Window Calls extension being installed.
///
/// When run from a terminal, also open the extension page so the user can
/// install it.
fn require_extension(bus: &dyn Bus) -> Result<(), Box<dyn std::error::Error>> {
    if extension_available(bus) {
        return Ok(());
    }

    let e = WindowError::ExtensionMissing;
    eprintln!("{e}");
    error!(event = "cli.extension_missing");
    events::log_app_error(&e);

    if std::io::stdin().is_terminal() {
        if let Err(open_err) = Command::new("xdg-open").arg(EXTENSION_URL).status() {
            warn!(event = "cli.extension_page_open_failed", error = %open_err);
        }
    }

    Err(e.into())
}

fn print_candidates(windows: &[WindowInfo]) {
    for window in windows {
        eprintln!("  {}: {}", window.app(), truncate_title(window.title()));
    }
}

/// Titles are clipped so long browser tabs do not flood the candidate list.
fn truncate_title(title: &str) -> String {
    title.chars().take(50).collect()
}
