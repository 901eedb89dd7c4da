//! `ticketdesk stats`

use anyhow::Result;
use std::fmt::Write;

use super::context::DeskContext;
use crate::analytics::TicketStatsSummary;
use crate::cli::args::OutputFormat;
use crate::format::{format_distance, format_duration, format_hour, format_rate};

/// Tickets shown in the recently closed and current open panels
const PANEL_SIZE: usize = 3;
const PEAK_HOURS_SHOWN: usize = 3;

pub fn run_stats_command(ctx: &DeskContext, format: OutputFormat) -> Result<()> {
    println!("{}", render_stats(ctx, format)?);
    Ok(())
}

pub fn render_stats(ctx: &DeskContext, format: OutputFormat) -> Result<String> {
    let summary = ctx.analyzer.summarize(ctx.store.all());

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&summary)?),
        OutputFormat::Text => Ok(render_text(ctx, &summary)),
    }
}

fn render_text(ctx: &DeskContext, summary: &TicketStatsSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Ticket Statistics");
    let _ = writeln!(out, "=================");
    let _ = writeln!(
        out,
        "Tickets:              {} ({} active)",
        ctx.store.len(),
        ctx.store.active_queue().len()
    );
    let _ = writeln!(out, "Resolved:             {}", summary.total_resolved);
    let _ = writeln!(
        out,
        "Avg resolution time:  {}",
        format_duration(summary.avg_resolution_time)
    );

    let _ = writeln!(out, "\nTop categories");
    if summary.common_categories.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for entry in &summary.common_categories {
        let _ = writeln!(out, "  {:<24} {:>4}", entry.category, entry.count);
    }

    let _ = writeln!(out, "\nPredicted peak hours");
    for peak in summary.top_peak_hours(PEAK_HOURS_SHOWN) {
        let _ = writeln!(
            out,
            "  {}  {:>4}",
            format_hour(peak.hour),
            format_rate(peak.probability)
        );
    }

    let _ = writeln!(out, "\nRecently closed");
    let closed = ctx.store.recently_closed(PANEL_SIZE);
    if closed.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for ticket in closed {
        let effort = ticket
            .actual_time
            .map(format_duration)
            .unwrap_or_else(|| "-".to_string());
        let when = ticket
            .resolved_at
            .map(|at| format_distance(at, ctx.now))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  #{:<4} {:<40} {:>7}  {}",
            ticket.id, ticket.title, effort, when
        );
    }

    let _ = writeln!(out, "\nCurrent open");
    let open = ctx.store.current_open(PANEL_SIZE);
    if open.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for ticket in open {
        let _ = writeln!(
            out,
            "  #{:<4} {:<10} {:<40} {}",
            ticket.id,
            format!("[{}]", ticket.priority),
            ticket.title,
            format_distance(ticket.created_at, ctx.now)
        );
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::context::sample_context;

    #[test]
    fn test_text_stats_panels() {
        let ctx = sample_context();
        let text = render_stats(&ctx, OutputFormat::Text).unwrap();

        assert!(text.starts_with("Ticket Statistics"));
        assert!(text.contains("Tickets:              25 (5 active)"));
        assert!(text.contains("Resolved:             20"));
        assert!(text.contains("Recently closed"));
        let latest = ctx.store.recently_closed(1)[0];
        let closed = text.split("Recently closed").nth(1).unwrap();
        assert!(closed.trim_start().starts_with(&format!("#{}", latest.id)));
        assert!(text.contains("[Critical] Critical Database Connection Failure"));
    }

    #[test]
    fn test_json_stats_shape() {
        let ctx = sample_context();
        let json = render_stats(&ctx, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["totalResolved"], 20);
        assert_eq!(value["activityByHour"].as_array().unwrap().len(), 24);
        assert_eq!(value["predictedPeakHours"].as_array().unwrap().len(), 24);
        assert_eq!(value["commonCategories"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_yaml_stats_parse_back() {
        let ctx = sample_context();
        let yaml = render_stats(&ctx, OutputFormat::Yaml).unwrap();
        let summary: TicketStatsSummary = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(summary, ctx.analyzer.summarize(ctx.store.all()));
    }
}
