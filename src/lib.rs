//! # Ticketdesk
//!
//! Analytics for a small support desk: aggregate a ticket collection into
//! resolution times, busy categories, hourly activity, predicted peak hours
//! and per-problem solution success rates.
//!
//! ## Usage
//!
//! ```bash
//! ticketdesk stats [--format json]
//! ticketdesk generate -o tickets.json
//! ticketdesk --data tickets.json serve --port 8080
//! ```
//!
//! ## Modules
//!
//! - `analytics` - Summary aggregation, caching, search, playbooks and the HTTP API
//! - `cli` - Argument parsing and command handlers
//! - `config` - Layered configuration (global, project, environment)
//! - `error` - Error type with stable codes and exit codes
//! - `format` - Human-readable durations, dates and rates
//! - `tickets` - Ticket model, persistence and sample data
//! - `testing` - Builders for tickets used by tests and benchmarks
pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod tickets;

pub mod testing;
