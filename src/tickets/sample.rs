//! Synthetic ticket data for demos and local runs
//!
//! Produces the same shape of data the dashboard shipped with: five open or
//! in-progress tickets, one hand-written resolved ticket and nineteen random
//! resolved tickets from the preceding days. Output is reproducible for a
//! given seed and reference time.

use super::models::{AttemptedSolution, Channel, OriginMessage, Priority, Status, Ticket};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Categories drawn for generated resolved tickets
pub const SAMPLE_CATEGORIES: [&str; 5] = [
    "Infrastructure",
    "Security",
    "Performance",
    "UI/UX",
    "Database",
];

/// Number of tickets [`SampleGenerator::generate`] returns
pub const SAMPLE_SIZE: usize = 25;

struct SeedTicket {
    title: &'static str,
    description: &'static str,
    message: &'static str,
    from: &'static str,
    problem: &'static str,
    priority: Priority,
    status: Status,
    hours_ago: f64,
    estimated: i64,
    category: &'static str,
    steps: [&'static str; 3],
    attempts: &'static [(&'static str, bool, f64)],
    resolution: Option<(f64, i64, &'static str)>,
}

const SEED_TICKETS: [SeedTicket; 6] = [
    SeedTicket {
        title: "Critical Database Connection Failure",
        description: "Production database is not responding to connection requests",
        message: "Urgent: Database connectivity issues affecting all users. Need immediate assistance.",
        from: "ops-team@company.com",
        problem: "Connection pool exhaustion due to connection leaks",
        priority: Priority::Critical,
        status: Status::InProgress,
        hours_ago: 2.0,
        estimated: 60,
        category: "Infrastructure",
        steps: [
            "Check database server status",
            "Review connection pool settings",
            "Analyze active connections",
        ],
        attempts: &[("Restarted database service", false, 1.5)],
        resolution: None,
    },
    SeedTicket {
        title: "Payment Gateway Integration Error",
        description: "Customers unable to complete purchases",
        message: "Payment processing is failing for all transactions. Error code: PG-501",
        from: "finance@company.com",
        problem: "API key expiration",
        priority: Priority::High,
        status: Status::Open,
        hours_ago: 4.0,
        estimated: 45,
        category: "Payment Systems",
        steps: [
            "Verify API credentials",
            "Check payment gateway status",
            "Review error logs",
        ],
        attempts: &[],
        resolution: None,
    },
    SeedTicket {
        title: "SSL Certificate Warning",
        description: "Users reporting security warnings on checkout page",
        message: "Security certificate error appearing for some users during checkout",
        from: "security@company.com",
        problem: "Certificate renewal needed",
        priority: Priority::High,
        status: Status::Open,
        hours_ago: 6.0,
        estimated: 30,
        category: "Security",
        steps: [
            "Check certificate expiration",
            "Verify SSL configuration",
            "Test on different browsers",
        ],
        attempts: &[],
        resolution: None,
    },
    SeedTicket {
        title: "Mobile App Crash on Launch",
        description: "iOS users reporting immediate app crash",
        message: "App crashes immediately after splash screen on iOS 15 devices",
        from: "mobile-team@company.com",
        problem: "Incompatible iOS framework version",
        priority: Priority::Medium,
        status: Status::InProgress,
        hours_ago: 3.0,
        estimated: 120,
        category: "Mobile",
        steps: [
            "Analyze crash reports",
            "Check iOS compatibility",
            "Review recent deployments",
        ],
        attempts: &[("Rolled back to previous version", false, 2.0)],
        resolution: None,
    },
    SeedTicket {
        title: "Report Generation Delay",
        description: "Monthly reports taking longer than usual to generate",
        message: "Monthly sales reports are taking over 30 minutes to generate",
        from: "reports@company.com",
        problem: "Inefficient query optimization",
        priority: Priority::Low,
        status: Status::Open,
        hours_ago: 5.0,
        estimated: 90,
        category: "Reporting",
        steps: [
            "Profile query performance",
            "Check database indexes",
            "Monitor resource usage",
        ],
        attempts: &[],
        resolution: None,
    },
    SeedTicket {
        title: "User Authentication Failure",
        description: "Users unable to log in to the system",
        message: "Multiple users reporting login failures across all departments",
        from: "support@company.com",
        problem: "LDAP service configuration issue",
        priority: Priority::Critical,
        status: Status::Resolved,
        hours_ago: 24.0,
        estimated: 60,
        category: "Authentication",
        steps: [
            "Verify LDAP service status",
            "Check configuration settings",
            "Test connection to LDAP server",
        ],
        attempts: &[
            ("Restarted LDAP service", false, 23.5),
            ("Updated LDAP configuration", true, 23.0),
        ],
        resolution: Some((
            23.0,
            45,
            "Corrected LDAP server configuration and restored service",
        )),
    },
];

/// Seeded generator for sample tickets
pub struct SampleGenerator {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl SampleGenerator {
    pub fn new(seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
        }
    }

    fn hours_ago(&self, hours: f64) -> DateTime<Utc> {
        self.now - Duration::milliseconds((hours * 3_600_000.0).round() as i64)
    }

    /// Generate the full sample set with ids "1" through "25"
    pub fn generate(&mut self) -> Vec<Ticket> {
        let mut tickets: Vec<Ticket> = SEED_TICKETS
            .iter()
            .enumerate()
            .map(|(index, seed)| self.from_seed(index + 1, seed))
            .collect();

        for id in (SEED_TICKETS.len() + 1)..=SAMPLE_SIZE {
            let ticket = self.random_resolved(id);
            tickets.push(ticket);
        }

        debug!(
            "Generated {} sample tickets relative to {}",
            tickets.len(),
            self.now
        );
        tickets
    }

    fn from_seed(&self, id: usize, seed: &SeedTicket) -> Ticket {
        let created_at = self.hours_ago(seed.hours_ago);
        let (resolved_at, actual_time, final_solution) = match seed.resolution {
            Some((hours, minutes, solution)) => {
                (Some(self.hours_ago(hours)), Some(minutes), solution.to_string())
            }
            None => (None, None, String::new()),
        };

        Ticket {
            id: id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            original_message: OriginMessage {
                channel: Channel::Email,
                content: seed.message.to_string(),
                timestamp: created_at,
                from: seed.from.to_string(),
            },
            actual_problem: seed.problem.to_string(),
            priority: seed.priority,
            status: seed.status,
            created_at,
            resolved_at,
            estimated_time: seed.estimated,
            actual_time,
            steps: seed.steps.iter().map(|s| s.to_string()).collect(),
            attempted_solutions: seed
                .attempts
                .iter()
                .map(|(description, successful, hours)| AttemptedSolution {
                    description: description.to_string(),
                    successful: *successful,
                    timestamp: self.hours_ago(*hours),
                })
                .collect(),
            final_solution,
            category: seed.category.to_string(),
            similar_tickets: Vec::new(),
        }
    }

    fn random_resolved(&mut self, id: usize) -> Ticket {
        let hours_ago = f64::from(self.rng.random_range(0..72u32) + 24);
        let resolution_minutes = i64::from(self.rng.random_range(0..120u32) + 30);
        let resolved_hours_ago = hours_ago - resolution_minutes as f64 / 60.0;

        let channel = if self.rng.random::<f64>() > 0.5 {
            Channel::Email
        } else {
            Channel::Voice
        };
        let priority = if self.rng.random::<f64>() > 0.7 {
            Priority::Critical
        } else if self.rng.random::<f64>() > 0.5 {
            Priority::High
        } else {
            Priority::Medium
        };
        let category = SAMPLE_CATEGORIES[self.rng.random_range(0..SAMPLE_CATEGORIES.len())];

        let created_at = self.hours_ago(hours_ago);
        let resolved_at = self.hours_ago(resolved_hours_ago);

        Ticket {
            id: id.to_string(),
            title: format!("Resolved Issue #{}", id),
            description: format!("Sample resolved ticket #{}", id),
            original_message: OriginMessage {
                channel,
                content: format!("This is a sample resolved ticket #{}", id),
                timestamp: created_at,
                from: format!("user{}@company.com", id),
            },
            actual_problem: format!("Sample problem for ticket #{}", id),
            priority,
            status: Status::Resolved,
            created_at,
            resolved_at: Some(resolved_at),
            estimated_time: 60,
            actual_time: Some(resolution_minutes),
            steps: vec![
                "Step 1".to_string(),
                "Step 2".to_string(),
                "Step 3".to_string(),
            ],
            attempted_solutions: vec![
                AttemptedSolution {
                    description: "First attempt".to_string(),
                    successful: false,
                    timestamp: self.hours_ago(hours_ago - 1.0),
                },
                AttemptedSolution {
                    description: "Second attempt".to_string(),
                    successful: true,
                    timestamp: resolved_at,
                },
            ],
            final_solution: format!("Resolution for ticket #{}", id),
            category: category.to_string(),
            similar_tickets: Vec::new(),
        }
    }
}

/// Generate the sample set for `seed` relative to `now`
pub fn sample_tickets(seed: u64, now: DateTime<Utc>) -> Vec<Ticket> {
    SampleGenerator::new(seed, now).generate()
}
