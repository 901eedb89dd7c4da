//! Ticket statistics aggregation
//!
//! Every function here is a pure computation over a borrowed ticket slice.
//! [`TicketAnalyzer`] bundles them into one [`TicketStatsSummary`].

use chrono::{DateTime, FixedOffset, Local, Offset, Timelike, Utc};
use std::collections::HashMap;
use std::f64::consts::PI;
use tracing::debug;

use super::models::{
    CategoryCount, HourlyActivity, PeakHour, ProblemSolutions, SolutionRate, TicketStatsSummary,
};
use crate::tickets::Ticket;

/// Hours in the activity histogram
pub const HOURS_PER_DAY: usize = 24;

/// Round to the nearest integer with halves going up, as JavaScript's `Math.round`
///
/// Values beyond the `i64` range saturate to `i64::MIN`/`i64::MAX` and NaN
/// becomes 0.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Mean actual effort of resolved tickets, rounded to whole minutes
///
/// Tickets that are not resolved, or resolved without an effort figure, are
/// ignored. Returns 0 when nothing qualifies.
pub fn average_resolution_minutes(tickets: &[Ticket]) -> i64 {
    let (sum, count) = tickets
        .iter()
        .filter_map(Ticket::resolution_minutes)
        .fold((0i128, 0u64), |(sum, count), minutes| {
            (sum + i128::from(minutes), count + 1)
        });

    if count == 0 {
        return 0;
    }
    round_half_up(sum as f64 / count as f64)
}

/// Number of tickets that contribute to [`average_resolution_minutes`]
pub fn resolved_count(tickets: &[Ticket]) -> u64 {
    tickets
        .iter()
        .filter(|t| t.resolution_minutes().is_some())
        .count() as u64
}

/// The `limit` most frequent categories across all tickets
///
/// Counts every ticket regardless of status. Equal counts keep the order in
/// which the categories first appeared.
pub fn category_frequency(tickets: &[Ticket], limit: usize) -> Vec<CategoryCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for ticket in tickets {
        match positions.get(ticket.category.as_str()) {
            Some(&index) => counts[index].count += 1,
            None => {
                positions.insert(ticket.category.as_str(), counts.len());
                counts.push(CategoryCount {
                    category: ticket.category.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Time zone used to decide which hour of the day a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportingZone {
    /// The host's local time zone
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl ReportingZone {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// A fixed offset east of UTC, or `None` if it is a day or more
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::Fixed)
    }

    /// Hour of day (0..=23) of `timestamp` in this zone
    pub fn hour_of(&self, timestamp: &DateTime<Utc>) -> u32 {
        match self {
            Self::Local => timestamp.with_timezone(&Local).hour(),
            Self::Fixed(offset) => timestamp.with_timezone(offset).hour(),
        }
    }

    /// Render `timestamp` in this zone with a chrono format string
    pub fn format(&self, timestamp: &DateTime<Utc>, pattern: &str) -> String {
        match self {
            Self::Local => timestamp.with_timezone(&Local).format(pattern).to_string(),
            Self::Fixed(offset) => timestamp.with_timezone(offset).format(pattern).to_string(),
        }
    }
}

/// Histogram of ticket creation times by hour of day
///
/// Always returns 24 entries for hours 0 through 23; each ticket lands in
/// exactly one of them.
pub fn hourly_activity(tickets: &[Ticket], zone: ReportingZone) -> Vec<HourlyActivity> {
    let mut distribution = vec![0u64; HOURS_PER_DAY];

    for ticket in tickets {
        let hour = zone.hour_of(&ticket.created_at) as usize;
        distribution[hour % HOURS_PER_DAY] += 1;
    }

    distribution
        .into_iter()
        .enumerate()
        .map(|(hour, count)| HourlyActivity {
            hour: hour as u32,
            count,
        })
        .collect()
}

/// Parameters of the peak-hour weighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakHourModel {
    /// Strength of the time-of-day bias
    pub amplitude: f64,
    /// Upper bound for any hour's probability
    pub cap: f64,
}

impl Default for PeakHourModel {
    fn default() -> Self {
        Self {
            amplitude: 0.2,
            cap: 0.95,
        }
    }
}

impl PeakHourModel {
    /// Weighted share of tickets for one hour, bounded to `[0, cap]`
    pub fn probability(&self, hour: u32, count: u64, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let share = count as f64 / total as f64;
        let bias = 1.0 + (hour as f64 / HOURS_PER_DAY as f64 * 2.0 * PI).sin() * self.amplitude;
        (share * bias).min(self.cap).max(0.0)
    }
}

/// Rank hours by their weighted share of activity
///
/// This is a heuristic time-of-day weighting of historical counts, not a
/// forecast. Equal probabilities stay in hour order.
pub fn predicted_peak_hours(
    activity: &[HourlyActivity],
    total: u64,
    model: &PeakHourModel,
) -> Vec<PeakHour> {
    let mut peaks: Vec<PeakHour> = activity
        .iter()
        .map(|entry| PeakHour {
            hour: entry.hour,
            probability: model.probability(entry.hour, entry.count, total),
        })
        .collect();

    peaks.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    peaks
}

#[derive(Default)]
struct AttemptTally {
    attempts: u64,
    successes: u64,
}

/// Success rate of each remediation, grouped by the problem it addressed
///
/// Attempts are pooled across tickets by `(actual_problem, description)`.
/// Problems appear in first-seen order; within a problem the best rate
/// comes first and ties keep first-seen order.
pub fn solution_success_rates(tickets: &[Ticket]) -> Vec<ProblemSolutions> {
    let mut problem_positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<(&str, AttemptTally)>)> = Vec::new();
    let mut attempt_positions: HashMap<(&str, &str), (usize, usize)> = HashMap::new();

    for ticket in tickets {
        let problem = ticket.actual_problem.as_str();
        for attempt in &ticket.attempted_solutions {
            let description = attempt.description.as_str();
            let (group, slot) = match attempt_positions.get(&(problem, description)) {
                Some(&position) => position,
                None => {
                    let group = *problem_positions.entry(problem).or_insert_with(|| {
                        groups.push((problem, Vec::new()));
                        groups.len() - 1
                    });
                    let solutions = &mut groups[group].1;
                    solutions.push((description, AttemptTally::default()));
                    let position = (group, solutions.len() - 1);
                    attempt_positions.insert((problem, description), position);
                    position
                }
            };

            let tally = &mut groups[group].1[slot].1;
            tally.attempts += 1;
            if attempt.successful {
                tally.successes += 1;
            }
        }
    }

    groups
        .into_iter()
        .map(|(problem, tallies)| {
            let mut solutions: Vec<SolutionRate> = tallies
                .into_iter()
                .map(|(description, tally)| SolutionRate {
                    description: description.to_string(),
                    success_rate: tally.successes as f64 / tally.attempts as f64,
                })
                .collect();
            solutions.sort_by(|a, b| b.success_rate.total_cmp(&a.success_rate));

            ProblemSolutions {
                problem: problem.to_string(),
                solutions,
            }
        })
        .collect()
}

/// Tunables for [`TicketAnalyzer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerSettings {
    pub top_categories: usize,
    pub peak_model: PeakHourModel,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            top_categories: 3,
            peak_model: PeakHourModel::default(),
        }
    }
}

/// Computes [`TicketStatsSummary`] values from ticket collections
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketAnalyzer {
    zone: ReportingZone,
    settings: AnalyzerSettings,
}

impl TicketAnalyzer {
    /// Analyzer bucketing hours in the host's local time zone
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: ReportingZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_settings(mut self, settings: AnalyzerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn zone(&self) -> ReportingZone {
        self.zone
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Aggregate statistics over the full collection
    pub fn summarize(&self, tickets: &[Ticket]) -> TicketStatsSummary {
        let activity_by_hour = hourly_activity(tickets, self.zone);
        let predicted_peak_hours = predicted_peak_hours(
            &activity_by_hour,
            tickets.len() as u64,
            &self.settings.peak_model,
        );

        let summary = TicketStatsSummary {
            avg_resolution_time: average_resolution_minutes(tickets),
            total_resolved: resolved_count(tickets),
            common_categories: category_frequency(tickets, self.settings.top_categories),
            activity_by_hour,
            predicted_peak_hours,
            common_solutions: solution_success_rates(tickets),
        };

        debug!(
            "Summarized {} tickets: {} resolved, avg {}m, {} problem groups",
            tickets.len(),
            summary.total_resolved,
            summary.avg_resolution_time,
            summary.common_solutions.len()
        );

        summary
    }
}
