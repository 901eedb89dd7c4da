//! `ticketdesk activity`

use anyhow::Result;
use std::fmt::Write;

use super::context::DeskContext;
use crate::format::{format_hour, format_rate};

const BAR_WIDTH: u64 = 40;

pub fn run_activity_command(ctx: &DeskContext, top: usize) -> Result<()> {
    println!("{}", render_activity(ctx, top));
    Ok(())
}

pub fn render_activity(ctx: &DeskContext, top: usize) -> String {
    let summary = ctx.analyzer.summarize(ctx.store.all());
    let busiest = summary
        .activity_by_hour
        .iter()
        .map(|a| a.count)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Ticket activity by hour ({} tickets)",
        summary.total_tickets()
    );
    for entry in &summary.activity_by_hour {
        let width = if busiest == 0 {
            0
        } else {
            (entry.count * BAR_WIDTH).div_ceil(busiest)
        };
        let _ = writeln!(
            out,
            "  {} {:>4} {}",
            format_hour(entry.hour),
            entry.count,
            "#".repeat(width as usize)
        );
    }

    let _ = writeln!(out, "\nPredicted peak hours");
    for peak in summary.top_peak_hours(top) {
        let _ = writeln!(
            out,
            "  {}  {:>4}",
            format_hour(peak.hour),
            format_rate(peak.probability)
        );
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::context::sample_context;

    #[test]
    fn test_activity_lists_every_hour() {
        let ctx = sample_context();
        let text = render_activity(&ctx, 3);

        assert!(text.starts_with("Ticket activity by hour (25 tickets)"));
        for hour in 0..24 {
            assert!(text.contains(&format!("  {:02}:00 ", hour)));
        }
        let peaks = text.split("Predicted peak hours").nth(1).unwrap();
        assert_eq!(peaks.trim().lines().count(), 3);
    }
}
