use clap::{Arg, ArgAction, ArgGroup, Command};

pub fn build_cli() -> Command {
    Command::new("wshot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Window screenshots for GNOME Wayland")
        .long_about(
            "wshot enumerates windows through the Window Calls shell extension and captures a \
             cropped screenshot of a selected window. Designed for scripts and coding agents \
             that need to see application UI on Wayland, where no compositor-level capture \
             API is exposed.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List windows as JSON"))
        .subcommand(
            Command::new("capture")
                .about("Capture a screenshot of one window")
                .arg(
                    Arg::new("app")
                        .help("Select window by application name substring (case-insensitive)")
                        .index(1),
                )
                .arg(
                    Arg::new("pid")
                        .long("pid")
                        .help("Select window by process id")
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    Arg::new("id")
                        .long("id")
                        .help("Select window by window id")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Select window by title substring (case-insensitive)"),
                )
                .group(
                    ArgGroup::new("selector")
                        .args(["app", "pid", "id", "title"])
                        .required(true),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .default_value("/tmp/screenshot.png"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_structure() {
        let app = build_cli();
        assert_eq!(app.get_name(), "wshot");
        assert!(app.is_subcommand_required_set());
    }

    #[test]
    fn test_cli_list() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["wshot", "list"]);
        assert!(matches.is_ok());
    }

    #[test]
    fn test_cli_capture_app_positional() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["wshot", "capture", "firefox"]);
        assert!(matches.is_ok());

        let matches = matches.unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(
            capture_matches.get_one::<String>("app").unwrap(),
            "firefox"
        );
    }

    #[test]
    fn test_cli_capture_pid() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["wshot", "capture", "--pid", "4242"]);
        assert!(matches.is_ok());

        let matches = matches.unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(*capture_matches.get_one::<i32>("pid").unwrap(), 4242);
    }

    #[test]
    fn test_cli_capture_id() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["wshot", "capture", "--id", "123456789"]);
        assert!(matches.is_ok());

        let matches = matches.unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(*capture_matches.get_one::<u64>("id").unwrap(), 123456789);
    }

    #[test]
    fn test_cli_capture_title() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["wshot", "capture", "--title", "Inbox"]);
        assert!(matches.is_ok());

        let matches = matches.unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(
            capture_matches.get_one::<String>("title").unwrap(),
            "Inbox"
        );
    }

    #[test]
    fn test_cli_capture_requires_a_selector() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["wshot", "capture"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_capture_selectors_conflict() {
        let app = build_cli();
        let matches =
            app.try_get_matches_from(vec!["wshot", "capture", "firefox", "--pid", "4242"]);
        assert!(matches.is_err());

        let app = build_cli();
        let matches =
            app.try_get_matches_from(vec!["wshot", "capture", "--id", "7", "--title", "x"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_capture_default_output() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["wshot", "capture", "firefox"])
            .unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(
            capture_matches.get_one::<String>("output").unwrap(),
            "/tmp/screenshot.png"
        );
    }

    #[test]
    fn test_cli_capture_custom_output() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec![
                "wshot", "capture", "--pid", "1", "-o", "/tmp/win.png",
            ])
            .unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(
            capture_matches.get_one::<String>("output").unwrap(),
            "/tmp/win.png"
        );
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["wshot", "list", "--verbose"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }
}
