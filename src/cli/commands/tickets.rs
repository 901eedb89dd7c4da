//! `ticketdesk queue`, `ticketdesk show` and `ticketdesk history`

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

use super::context::DeskContext;
use crate::cli::args::HistoryFormat;
use crate::format::{format_date, format_distance, format_duration};
use crate::tickets::{Priority, Ticket};

pub fn run_queue_command(ctx: &DeskContext, priority: Option<Priority>) -> Result<()> {
    println!("{}", render_queue(ctx, priority));
    Ok(())
}

pub fn run_show_command(ctx: &DeskContext, id: &str) -> Result<()> {
    println!("{}", render_ticket(ctx, id)?);
    Ok(())
}

pub fn run_history_command(ctx: &DeskContext, format: HistoryFormat) -> Result<()> {
    println!("{}", render_history(ctx, format)?);
    Ok(())
}

pub fn render_queue(ctx: &DeskContext, priority: Option<Priority>) -> String {
    let queue: Vec<&Ticket> = ctx
        .store
        .active_queue()
        .into_iter()
        .filter(|t| priority.map_or(true, |p| t.priority == p))
        .collect();

    if queue.is_empty() {
        return "No active tickets".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Active tickets ({})", queue.len());
    for ticket in queue {
        let _ = writeln!(
            out,
            "  #{:<4} {:<10} {:<12} {:<40} {:<16} est. {}  {}",
            ticket.id,
            format!("[{}]", ticket.priority),
            ticket.status,
            ticket.title,
            ticket.category,
            format_duration(ticket.estimated_time),
            format_distance(ticket.created_at, ctx.now)
        );
    }
    out.trim_end().to_string()
}

pub fn render_ticket(ctx: &DeskContext, id: &str) -> Result<String> {
    let ticket = ctx.store.require(id)?;
    let zone = ctx.zone();
    let mut out = String::new();

    let _ = writeln!(out, "#{} {}", ticket.id, ticket.title);
    let _ = writeln!(
        out,
        "Status: {}  Priority: {}  Category: {}",
        ticket.status, ticket.priority, ticket.category
    );
    let _ = writeln!(out, "Created: {}", format_date(&ticket.created_at, zone));
    if let Some(resolved_at) = ticket.resolved_at {
        let _ = writeln!(out, "Resolved: {}", format_date(&resolved_at, zone));
    }
    let _ = writeln!(
        out,
        "Effort: estimated {}, actual {}",
        format_duration(ticket.estimated_time),
        ticket
            .actual_time
            .map(format_duration)
            .unwrap_or_else(|| "-".to_string())
    );

    let _ = writeln!(out, "\n{}", ticket.description);

    let message = &ticket.original_message;
    let _ = writeln!(
        out,
        "\nOriginal message ({:?} from {}, {}):",
        message.channel,
        message.from,
        format_date(&message.timestamp, zone)
    );
    let _ = writeln!(out, "  {}", message.content);

    let _ = writeln!(out, "\nActual problem: {}", ticket.actual_problem);

    if !ticket.steps.is_empty() {
        let _ = writeln!(out, "\nSteps:");
        for (index, step) in ticket.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, step);
        }
    }

    if !ticket.attempted_solutions.is_empty() {
        let _ = writeln!(out, "\nAttempted solutions:");
        for attempt in &ticket.attempted_solutions {
            let _ = writeln!(
                out,
                "  [{}] {} ({})",
                if attempt.successful { "ok" } else { "failed" },
                attempt.description,
                format_date(&attempt.timestamp, zone)
            );
        }
    }

    if !ticket.final_solution.is_empty() {
        let _ = writeln!(out, "\nFinal solution: {}", ticket.final_solution);
    }

    let similar = ctx.store.similar_to(id)?;
    if !similar.is_empty() {
        let _ = writeln!(out, "\nSimilar tickets:");
        for other in similar {
            let _ = writeln!(out, "  #{} {}", other.id, other.title);
        }
    }

    Ok(out.trim_end().to_string())
}

/// One row of the CSV history export
#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    priority: &'static str,
    created_at: String,
    resolved_at: String,
    actual_minutes: Option<i64>,
    final_solution: &'a str,
}

impl<'a> From<&'a Ticket> for HistoryRow<'a> {
    fn from(ticket: &'a Ticket) -> Self {
        Self {
            id: &ticket.id,
            title: &ticket.title,
            category: &ticket.category,
            priority: ticket.priority.as_str(),
            created_at: ticket.created_at.to_rfc3339(),
            resolved_at: ticket
                .resolved_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
            actual_minutes: ticket.actual_time,
            final_solution: &ticket.final_solution,
        }
    }
}

pub fn render_history(ctx: &DeskContext, format: HistoryFormat) -> Result<String> {
    let history = ctx.store.history();

    match format {
        HistoryFormat::Json => Ok(serde_json::to_string_pretty(&history)?),
        HistoryFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for ticket in &history {
                writer.serialize(HistoryRow::from(*ticket))?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
            String::from_utf8(bytes).context("CSV output was not valid UTF-8")
        }
        HistoryFormat::Text => {
            if history.is_empty() {
                return Ok("No resolved tickets".to_string());
            }
            let mut out = String::new();
            let _ = writeln!(out, "Resolved tickets ({})", history.len());
            for ticket in history {
                let _ = writeln!(
                    out,
                    "  #{:<4} {:<40} {:<16} {:>7}  {}",
                    ticket.id,
                    ticket.title,
                    ticket.category,
                    ticket
                        .actual_time
                        .map(format_duration)
                        .unwrap_or_else(|| "-".to_string()),
                    ticket.final_solution
                );
            }
            Ok(out.trim_end().to_string())
        }
    }
}
