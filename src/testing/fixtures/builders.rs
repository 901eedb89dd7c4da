//! Test data builders for ticket scenarios

use crate::tickets::{AttemptedSolution, Channel, OriginMessage, Priority, Status, Ticket};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Builder for creating test tickets
///
/// Defaults to an open, medium priority ticket in the `General` category
/// created at 2024-01-15 10:00 UTC.
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let created_at = Self::base_time();

        Self {
            ticket: Ticket {
                title: format!("Ticket {}", id),
                description: format!("Description for ticket {}", id),
                original_message: OriginMessage {
                    channel: Channel::Email,
                    content: format!("Message for ticket {}", id),
                    timestamp: created_at,
                    from: "customer@company.com".to_string(),
                },
                actual_problem: "Unknown".to_string(),
                priority: Priority::Medium,
                status: Status::Open,
                created_at,
                resolved_at: None,
                estimated_time: 60,
                actual_time: None,
                steps: Vec::new(),
                attempted_solutions: Vec::new(),
                final_solution: String::new(),
                category: "General".to_string(),
                similar_tickets: Vec::new(),
                id,
            },
        }
    }

    /// 2024-01-15 00:00 UTC, the day every builder ticket lands on
    pub fn base_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn base_time() -> DateTime<Utc> {
        Self::base_day() + Duration::hours(10)
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.ticket.title = title.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.ticket.description = description.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.ticket.category = category.to_string();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.ticket.priority = priority;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.ticket.status = status;
        self
    }

    pub fn with_problem(mut self, problem: &str) -> Self {
        self.ticket.actual_problem = problem.to_string();
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.ticket.original_message.channel = channel;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.ticket.created_at = created_at;
        self.ticket.original_message.timestamp = created_at;
        self
    }

    /// Place the ticket at `hour`:00 UTC on the base day
    pub fn created_at_hour(self, hour: u32) -> Self {
        let created_at = Self::base_day() + Duration::hours(i64::from(hour % 24));
        self.created_at(created_at)
    }

    pub fn with_step(mut self, step: &str) -> Self {
        self.ticket.steps.push(step.to_string());
        self
    }

    pub fn with_attempt(mut self, description: &str, successful: bool) -> Self {
        let timestamp = self.ticket.created_at
            + Duration::minutes(10 * (self.ticket.attempted_solutions.len() as i64 + 1));
        self.ticket.attempted_solutions.push(AttemptedSolution {
            description: description.to_string(),
            successful,
            timestamp,
        });
        self
    }

    pub fn with_final_solution(mut self, solution: &str) -> Self {
        self.ticket.final_solution = solution.to_string();
        self
    }

    pub fn with_similar(mut self, ids: &[&str]) -> Self {
        self.ticket.similar_tickets = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Mark resolved after `minutes` of actual effort
    pub fn resolved(mut self, minutes: i64) -> Self {
        self.ticket.status = Status::Resolved;
        self.ticket.actual_time = Some(minutes);
        self
    }

    pub fn resolved_at(mut self, resolved_at: DateTime<Utc>) -> Self {
        self.ticket.resolved_at = Some(resolved_at);
        self
    }

    /// Finish the ticket, deriving `resolved_at` from the effort when unset.
    ///
    /// Efforts too large for a timestamp offset resolve at `created_at`.
    pub fn build(mut self) -> Ticket {
        if self.ticket.is_resolved() && self.ticket.resolved_at.is_none() {
            let created_at = self.ticket.created_at;
            let minutes = self.ticket.actual_time.unwrap_or(0);
            let resolved_at = Duration::try_minutes(minutes)
                .and_then(|effort| created_at.checked_add_signed(effort))
                .unwrap_or(created_at);
            self.ticket.resolved_at = Some(resolved_at);
        }
        self.ticket
    }
}
