//! Command implementation modules
//!
//! Each command renders its output to a `String` so it can be tested without
//! capturing stdout; the `run_*` wrappers print it.

pub mod activity;
pub mod context;
pub mod generate;
pub mod search;
pub mod serve;
pub mod solutions;
pub mod stats;
pub mod tickets;

pub use activity::run_activity_command;
pub use context::DeskContext;
pub use generate::run_generate_command;
pub use search::run_search_command;
pub use serve::run_serve_command;
pub use solutions::run_solutions_command;
pub use stats::run_stats_command;
pub use tickets::{run_history_command, run_queue_command, run_show_command};
