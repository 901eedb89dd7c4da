//! Data models produced by ticket analytics

use serde::{Deserialize, Serialize};

/// Number of tickets sharing a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Tickets created during one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyActivity {
    pub hour: u32,
    pub count: u64,
}

/// Weighted likelihood that an hour is busy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakHour {
    pub hour: u32,
    pub probability: f64,
}

/// How often one attempted remediation worked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRate {
    pub description: String,
    /// Fraction of attempts that succeeded, in [0, 1]
    pub success_rate: f64,
}

/// Remediations tried against one root cause, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSolutions {
    pub problem: String,
    pub solutions: Vec<SolutionRate>,
}

/// Aggregate statistics over a ticket collection
///
/// Always derived from the full collection; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatsSummary {
    /// Mean actual effort of resolved tickets, in whole minutes
    pub avg_resolution_time: i64,
    pub total_resolved: u64,
    pub common_categories: Vec<CategoryCount>,
    /// Exactly 24 entries, hours 0 through 23 in order
    pub activity_by_hour: Vec<HourlyActivity>,
    /// Exactly 24 entries, most likely hour first
    pub predicted_peak_hours: Vec<PeakHour>,
    pub common_solutions: Vec<ProblemSolutions>,
}

impl TicketStatsSummary {
    /// Total tickets counted across the hourly histogram
    pub fn total_tickets(&self) -> u64 {
        self.activity_by_hour.iter().map(|a| a.count).sum()
    }

    /// The `n` most likely peak hours
    pub fn top_peak_hours(&self, n: usize) -> &[PeakHour] {
        &self.predicted_peak_hours[..n.min(self.predicted_peak_hours.len())]
    }
}

/// A resolved ticket whose fix matches a search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub ticket_id: String,
    pub title: String,
    pub solution: String,
    /// Percentage of query terms the ticket matched, 0 to 100
    pub confidence: u8,
}

/// A common problem with its ranked fixes and a remediation checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionGuide {
    pub problem: String,
    pub solutions: Vec<GuidedSolution>,
}

/// One ranked fix plus the steps to carry it out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidedSolution {
    pub description: String,
    pub success_rate: f64,
    pub reliable: bool,
    pub steps: Vec<String>,
}
