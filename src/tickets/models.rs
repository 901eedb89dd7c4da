//! Data models for support tickets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Channel a ticket's originating message arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Voice,
}

/// Urgency of a ticket. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!(
                "unknown priority '{}' (expected critical, high, medium or low)",
                other
            )),
        }
    }
}

/// Lifecycle state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            _ => Err(format!(
                "unknown status '{}' (expected open, in-progress or resolved)",
                s
            )),
        }
    }
}

/// The message a customer originally sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginMessage {
    #[serde(rename = "type")]
    pub channel: Channel,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub from: String,
}

/// A logged remediation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptedSolution {
    pub description: String,
    pub successful: bool,
    pub timestamp: DateTime<Utc>,
}

/// A customer support ticket
///
/// `resolved_at` and `actual_time` are expected to be set exactly when the
/// ticket is resolved. The type does not enforce this; see
/// [`Ticket::lifecycle_violations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub original_message: OriginMessage,
    pub actual_problem: String,
    pub priority: Priority,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Estimated effort in minutes
    pub estimated_time: i64,
    /// Actual effort in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<i64>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub attempted_solutions: Vec<AttemptedSolution>,
    #[serde(default)]
    pub final_solution: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar_tickets: Vec<String>,
}

impl Ticket {
    pub fn is_resolved(&self) -> bool {
        self.status == Status::Resolved
    }

    /// Open or in progress
    pub fn is_active(&self) -> bool {
        !self.is_resolved()
    }

    /// Actual effort for resolved tickets that recorded one
    pub fn resolution_minutes(&self) -> Option<i64> {
        if self.is_resolved() {
            self.actual_time
        } else {
            None
        }
    }

    /// Describe every way this ticket breaks the resolved-fields invariant.
    pub fn lifecycle_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.is_resolved() {
            if self.resolved_at.is_none() {
                violations.push("resolved ticket has no resolvedAt timestamp".to_string());
            }
            if self.actual_time.is_none() {
                violations.push("resolved ticket has no actualTime".to_string());
            }
        } else {
            if self.resolved_at.is_some() {
                violations.push(format!("{} ticket has a resolvedAt timestamp", self.status));
            }
            if self.actual_time.is_some() {
                violations.push(format!("{} ticket has an actualTime", self.status));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::TicketBuilder;

    #[test]
    fn test_status_serializes_with_space() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let status: Status = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status, Status::InProgress);
    }

    #[test]
    fn test_status_and_priority_from_str() {
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("In Progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("RESOLVED".parse::<Status>().unwrap(), Status::Resolved);
        assert!("closed".parse::<Status>().is_err());

        assert_eq!("critical".parse::<Priority>().unwrap(), Priority::Critical);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_ticket_uses_camel_case_fields() {
        let ticket = TicketBuilder::new("1").resolved(45).build();
        let value = serde_json::to_value(&ticket).unwrap();

        assert!(value.get("originalMessage").is_some());
        assert!(value.get("actualProblem").is_some());
        assert!(value.get("attemptedSolutions").is_some());
        assert_eq!(value["actualTime"], 45);
        assert_eq!(value["originalMessage"]["type"], "email");
        assert!(value.get("similarTickets").is_none());
    }

    #[test]
    fn test_ticket_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "9",
            "title": "Printer offline",
            "description": "Office printer unreachable",
            "originalMessage": {
                "type": "voice",
                "content": "The printer is down",
                "timestamp": "2024-03-01T09:15:00Z",
                "from": "front-desk@company.com"
            },
            "actualProblem": "DHCP lease expired",
            "priority": "Low",
            "status": "Open",
            "createdAt": "2024-03-01T09:15:00Z",
            "estimatedTime": 20,
            "category": "Hardware"
        }"#;

        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.original_message.channel, Channel::Voice);
        assert!(ticket.resolved_at.is_none());
        assert!(ticket.steps.is_empty());
        assert!(ticket.attempted_solutions.is_empty());
        assert!(ticket.lifecycle_violations().is_empty());
    }

    #[test]
    fn test_lifecycle_violations() {
        let consistent = TicketBuilder::new("1").resolved(30).build();
        assert!(consistent.lifecycle_violations().is_empty());

        let mut missing = TicketBuilder::new("2").resolved(30).build();
        missing.actual_time = None;
        missing.resolved_at = None;
        assert_eq!(missing.lifecycle_violations().len(), 2);

        let mut premature = TicketBuilder::new("3").build();
        premature.actual_time = Some(10);
        let violations = premature.lifecycle_violations();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("Open ticket has an actualTime"));
    }

    #[test]
    fn test_resolution_minutes_only_for_resolved() {
        let resolved = TicketBuilder::new("1").resolved(45).build();
        assert_eq!(resolved.resolution_minutes(), Some(45));

        let mut open = TicketBuilder::new("2").build();
        open.actual_time = Some(45);
        assert_eq!(open.resolution_minutes(), None);
        assert!(open.is_active());
    }
}
