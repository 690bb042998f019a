//! Mode routing
//!
//! Entry points for the two execution modes:
//! - Server mode (HTTP server, default)
//! - CLI mode (offline management commands)

pub mod server;

pub use server::run_server;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    Server,
    Cli,
}

/// Detect which mode to run based on the parsed subcommand
///
/// No subcommand or `serve` starts the server; anything else is a CLI command.
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        None => Mode::Server,
        Some(cmd) if cmd.is_server() => Mode::Server,
        Some(_) => Mode::Cli,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mode() {
        assert_eq!(detect_mode(None), Mode::Server);
        assert_eq!(detect_mode(Some(&Commands::Serve)), Mode::Server);
        assert_eq!(detect_mode(Some(&Commands::List)), Mode::Cli);
    }
}
