//! Command routing and execution
//!
//! This module handles routing CLI commands to their respective implementations.

use crate::cli::args::Commands;
use crate::cli::commands::*;
use crate::config::DeskConfig;
use anyhow::Result;
use chrono::Utc;

/// Execute a CLI command against the loaded configuration
pub async fn execute_command(command: Option<Commands>, config: DeskConfig) -> Result<()> {
    let now = Utc::now();

    match command {
        Some(Commands::Generate { seed, output }) => {
            run_generate_command(&config, seed, output.as_deref(), now)
        }
        Some(Commands::Serve { host, port }) => {
            let ctx = DeskContext::load(config, now)?;
            run_serve_command(ctx, host, port).await
        }
        Some(command) => {
            let ctx = DeskContext::load(config, now)?;
            match command {
                Commands::Stats { format } => run_stats_command(&ctx, format),
                Commands::Queue { priority } => run_queue_command(&ctx, priority),
                Commands::Show { id } => run_show_command(&ctx, &id),
                Commands::History { format } => run_history_command(&ctx, format),
                Commands::Activity { top } => run_activity_command(&ctx, top),
                Commands::Solutions => run_solutions_command(&ctx),
                Commands::Search { query, limit } => run_search_command(&ctx, &query, limit),
                Commands::Generate { .. } | Commands::Serve { .. } => Ok(()),
            }
        }
        None => {
            // No command provided, show help
            use crate::cli::help::generate_help;
            println!("{}", generate_help());
            Ok(())
        }
    }
}
