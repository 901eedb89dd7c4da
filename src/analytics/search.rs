//! Keyword search over resolved tickets

use super::engine::round_half_up;
use super::models::SearchResult;
use crate::tickets::Ticket;
use tracing::debug;

const MIN_TERM_LEN: usize = 3;

/// Split a query into distinct lowercase alphanumeric terms of at least three characters
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
    {
        if !terms.iter().any(|existing| existing == term) {
            terms.push(term.to_string());
        }
    }
    terms
}

fn searchable_text(ticket: &Ticket) -> String {
    [
        ticket.title.as_str(),
        ticket.description.as_str(),
        ticket.actual_problem.as_str(),
        ticket.category.as_str(),
        ticket.final_solution.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Find resolved tickets whose recorded fix looks relevant to `query`
///
/// Confidence is the rounded percentage of query terms found in the ticket.
/// Results are ordered by confidence, then by position in `tickets`.
pub fn search(tickets: &[Ticket], query: &str, limit: usize) -> Vec<SearchResult> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = tickets
        .iter()
        .filter(|t| t.is_resolved() && !t.final_solution.trim().is_empty())
        .filter_map(|ticket| {
            let haystack = searchable_text(ticket);
            let matched = terms.iter().filter(|term| haystack.contains(*term)).count();
            if matched == 0 {
                return None;
            }
            let confidence = round_half_up(matched as f64 * 100.0 / terms.len() as f64);
            Some(SearchResult {
                ticket_id: ticket.id.clone(),
                title: ticket.title.clone(),
                solution: ticket.final_solution.clone(),
                confidence: confidence.clamp(0, 100) as u8,
            })
        })
        .collect();

    results.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    results.truncate(limit);

    debug!(
        "Search for {:?} ({} terms) matched {} tickets",
        query,
        terms.len(),
        results.len()
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::TicketBuilder;

    fn corpus() -> Vec<Ticket> {
        vec![
            TicketBuilder::new("1")
                .with_title("LDAP login failure")
                .with_problem("LDAP configuration drift")
                .with_final_solution("Corrected LDAP server configuration")
                .resolved(45)
                .build(),
            TicketBuilder::new("2")
                .with_title("Database timeout")
                .with_problem("Connection pool exhausted")
                .with_final_solution("Raised pool size and fixed leak")
                .resolved(90)
                .build(),
            TicketBuilder::new("3")
                .with_title("LDAP outage in progress")
                .with_final_solution("Not yet known")
                .build(),
            TicketBuilder::new("4")
                .with_title("LDAP sync lag")
                .resolved(10)
                .build(),
        ]
    }

    #[test]
    fn test_query_terms() {
        assert_eq!(
            query_terms("LDAP is down, ldap config!"),
            vec!["ldap", "down", "config"]
        );
        assert!(query_terms("a an of").is_empty());
    }

    #[test]
    fn test_only_resolved_tickets_with_solutions_match() {
        let results = search(&corpus(), "ldap", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ticket_id, "1");
        assert_eq!(results[0].confidence, 100);
        assert_eq!(results[0].solution, "Corrected LDAP server configuration");
    }

    #[test]
    fn test_confidence_is_share_of_terms() {
        let results = search(&corpus(), "database pool restart", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ticket_id, "2");
        assert_eq!(results[0].confidence, 67);
    }

    #[test]
    fn test_results_ordered_by_confidence_and_limited() {
        let results = search(&corpus(), "ldap pool leak", 10);
        let ids: Vec<&str> = results.iter().map(|r| r.ticket_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);

        assert_eq!(search(&corpus(), "ldap pool leak", 1).len(), 1);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(search(&corpus(), "", 10).is_empty());
        assert!(search(&corpus(), "  ?! ", 10).is_empty());
        assert!(search(&corpus(), "printer", 10).is_empty());
    }
}
