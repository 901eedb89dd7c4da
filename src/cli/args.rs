//! CLI argument structures
//!
//! This module defines the main CLI structure and all subcommand definitions.

use crate::tickets::Priority;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect support tickets and their statistics
#[derive(Parser)]
#[command(name = "ticketdesk")]
#[command(about = "ticketdesk - Support ticket statistics from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use instead of ./ticketdesk.toml
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ticket file (.json, .yaml or .yml) to load instead of sample data
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Bucket activity by UTC hour instead of local time
    #[arg(long, global = true)]
    pub utc: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the ticket statistics summary
    Stats {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List open and in-progress tickets
    Queue {
        /// Only show tickets with this priority
        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// Show one ticket in detail
    Show {
        /// Ticket id
        id: String,
    },

    /// List resolved tickets
    History {
        #[arg(short, long, value_enum, default_value_t = HistoryFormat::Text)]
        format: HistoryFormat,
    },

    /// Show the hourly activity histogram and predicted peak hours
    Activity {
        /// Number of peak hours to list
        #[arg(short = 'n', long, default_value = "5")]
        top: usize,
    },

    /// Show solution success rates with remediation steps
    Solutions,

    /// Search resolved tickets for a known fix
    Search {
        /// Words describing the problem
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Write a generated sample ticket set
    Generate {
        /// Seed for the random tickets (defaults to the configured seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file; format follows the extension. Prints JSON when omitted.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Serve tickets and statistics over a JSON API
    Serve {
        /// Address to bind (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    Text,
    Csv,
    Json,
}
