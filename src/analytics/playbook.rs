//! Remediation checklists for common solutions

use super::models::{GuidedSolution, ProblemSolutions, SolutionGuide};

/// Success rate at or above which a solution counts as reliable
pub const RELIABLE_SUCCESS_RATE: f64 = 0.7;

const DATABASE_STEPS: [&str; 5] = [
    "Check if the database service is running",
    "Look for any error messages in the logs",
    "Verify database connection settings",
    "Test the connection with basic queries",
    "Restart the database service if needed",
];

const API_STEPS: [&str; 5] = [
    "Check if the API key is valid",
    "Verify the API endpoint URL",
    "Test the API connection",
    "Look for authentication errors",
    "Update API credentials if expired",
];

const GENERAL_STEPS: [&str; 5] = [
    "Identify the exact error message",
    "Check system logs for details",
    "Test basic functionality",
    "Apply the suggested fix",
    "Verify the solution works",
];

/// Plain-language steps for carrying out a solution
///
/// Keyword matching is case sensitive: `database` or `connection` selects the
/// database checklist, `API` or `authentication` the API checklist.
pub fn remediation_steps(description: &str) -> &'static [&'static str] {
    if description.contains("database") || description.contains("connection") {
        &DATABASE_STEPS
    } else if description.contains("API") || description.contains("authentication") {
        &API_STEPS
    } else {
        &GENERAL_STEPS
    }
}

pub fn is_reliable(success_rate: f64) -> bool {
    success_rate >= RELIABLE_SUCCESS_RATE
}

/// Attach checklists and reliability flags to ranked solutions
pub fn solution_guides(groups: &[ProblemSolutions]) -> Vec<SolutionGuide> {
    groups
        .iter()
        .map(|group| SolutionGuide {
            problem: group.problem.clone(),
            solutions: group
                .solutions
                .iter()
                .map(|solution| GuidedSolution {
                    description: solution.description.clone(),
                    success_rate: solution.success_rate,
                    reliable: is_reliable(solution.success_rate),
                    steps: remediation_steps(&solution.description)
                        .iter()
                        .map(|step| step.to_string())
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
