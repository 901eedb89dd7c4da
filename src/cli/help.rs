//! Help text generation and log level selection

use crate::cli::args::Cli;
use clap::CommandFactory;

/// Generate comprehensive help text for the CLI
pub fn generate_help() -> String {
    Cli::command().render_help().to_string()
}

/// Log filter for a verbosity count, falling back to `configured` without `-v`
pub fn get_log_level(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        2 => "trace".to_string(),
        _ => "trace,hyper=debug,tower=debug".to_string(), // -vvv shows everything including dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_level() {
        assert_eq!(get_log_level(0, "warn"), "warn");
        assert_eq!(get_log_level(1, "warn"), "debug");
        assert_eq!(get_log_level(2, "info"), "trace");
        assert_eq!(get_log_level(5, "info"), "trace,hyper=debug,tower=debug");
    }

    #[test]
    fn test_generate_help_lists_commands() {
        let help = generate_help();
        for command in ["stats", "queue", "history", "search", "serve"] {
            assert!(help.contains(command), "help is missing {}", command);
        }
    }
}
