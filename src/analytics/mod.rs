//! Ticket statistics and the views built on top of them
//!
//! The aggregation in [`engine`] is pure and synchronous. [`cache`] memoizes
//! summaries per collection, and [`api_server`] serves them over HTTP.

pub mod api_server;
pub mod cache;
pub mod engine;
pub mod models;
pub mod playbook;
pub mod search;

pub use api_server::{build_router, ApiState, TicketApiServer};
pub use cache::{CacheStats, SummaryCache};
pub use engine::{
    average_resolution_minutes, category_frequency, hourly_activity, predicted_peak_hours,
    resolved_count, round_half_up, solution_success_rates, AnalyzerSettings, PeakHourModel,
    ReportingZone, TicketAnalyzer, HOURS_PER_DAY,
};
pub use models::*;
pub use playbook::{is_reliable, remediation_steps, solution_guides};
pub use search::search;
