// CLI definitions using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

const SEARCH_PATHS: &str = "\
If --css is not given, style.css is looked up in these directories, in order:
  ~/.wlosd/
  ${XDG_CONFIG_HOME}/wlosd/
  ~/.config/wlosd/
  /etc/xdg/wlosd/

Commands are read from stdin, one per line. Send `help` for the list.";

#[derive(Parser)]
#[command(name = "wlosd")]
#[command(author, version, about = "On-screen display for Wayland compositors")]
#[command(after_help = SEARCH_PATHS)]
pub struct Cli {
    /// Stylesheet to apply to all windows
    #[arg(short, long, value_name = "FILE")]
    pub css: Option<PathBuf>,

    /// Increase log verbosity (-v warnings, -vv info, -vvv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbosity: u8,

    /// Display backend [default: gtk when built with it, otherwise headless]
    #[arg(long, value_enum, default_value_t = DEFAULT_BACKEND, hide_default_value = true)]
    pub backend: Backend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// GTK4 windows on the wlr-layer-shell overlay layer
    Gtk,
    /// No display; surfaces are logged
    Headless,
}

/// The overlay backend when it was compiled in
pub const DEFAULT_BACKEND: Backend = if cfg!(feature = "gtk") {
    Backend::Gtk
} else {
    Backend::Headless
};

impl Cli {
    /// Default log level for the `-v` count; RUST_LOG overrides it.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["wlosd"]).unwrap();
        assert_eq!(cli.backend, DEFAULT_BACKEND);
        assert_eq!(cli.css, None);
        assert_eq!(cli.log_level(), "error");
    }

    #[cfg(not(feature = "gtk"))]
    #[test]
    fn test_default_backend_starts_without_gtk() {
        let cli = Cli::try_parse_from(["wlosd"]).unwrap();
        assert_eq!(cli.backend, Backend::Headless);
    }

    #[cfg(feature = "gtk")]
    #[test]
    fn test_default_backend_is_gtk() {
        let cli = Cli::try_parse_from(["wlosd"]).unwrap();
        assert_eq!(cli.backend, Backend::Gtk);
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["wlosd", "-vv", "--backend", "headless"]).unwrap();
        assert_eq!(cli.log_level(), "info");
        assert_eq!(cli.backend, Backend::Headless);

        let cli = Cli::try_parse_from(["wlosd", "-vvvv", "-c", "/tmp/a.css"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.css, Some(PathBuf::from("/tmp/a.css")));
    }
}
