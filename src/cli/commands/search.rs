//! `ticketdesk search`

use anyhow::Result;
use std::fmt::Write;

use super::context::DeskContext;
use crate::analytics::search;

pub fn run_search_command(ctx: &DeskContext, query: &[String], limit: usize) -> Result<()> {
    println!("{}", render_search(ctx, &query.join(" "), limit));
    Ok(())
}

pub fn render_search(ctx: &DeskContext, query: &str, limit: usize) -> String {
    let results = search(ctx.store.all(), query, limit);
    if results.is_empty() {
        return format!("No resolved tickets match \"{}\"", query);
    }

    let mut out = String::new();
    for result in results {
        let _ = writeln!(
            out,
            "{:>3}%  #{} {}\n      {}",
            result.confidence, result.ticket_id, result.title, result.solution
        );
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::context::sample_context;

    #[test]
    fn test_search_finds_ldap_fix() {
        let ctx = sample_context();
        let text = render_search(&ctx, "LDAP configuration", 5);

        assert!(text.starts_with("100%  #6 User Authentication Failure"));
        assert!(text.contains("Corrected LDAP server configuration and restored service"));
    }

    #[test]
    fn test_search_without_matches() {
        let ctx = sample_context();
        assert_eq!(
            render_search(&ctx, "printer toner", 5),
            "No resolved tickets match \"printer toner\""
        );
    }
}
