//! CLI command handlers
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Command implementations
//! - Help text and log level selection

pub mod args;
pub mod commands;
pub mod help;
pub mod router;

// Re-export the main CLI structures for convenience
pub use args::{Cli, Commands, HistoryFormat, OutputFormat};
pub use help::{generate_help, get_log_level};
pub use router::execute_command;

use crate::config::{DeskConfig, LoadOptions};

/// Configuration loading options implied by the global flags
pub fn load_options(cli: &Cli) -> LoadOptions {
    LoadOptions {
        explicit_path: cli.config.clone(),
        skip_global: false,
    }
}

/// Apply `--data` and `--utc` on top of loaded configuration
pub fn apply_overrides(cli: &Cli, config: &mut DeskConfig) {
    if let Some(data) = &cli.data {
        config.data_file = Some(data.clone());
    }
    if cli.utc {
        config.analytics.utc_offset_minutes = Some(0);
    }
}
