//! `ticketdesk solutions`

use anyhow::Result;
use std::fmt::Write;

use super::context::DeskContext;
use crate::analytics::solution_guides;
use crate::format::format_rate;

pub fn run_solutions_command(ctx: &DeskContext) -> Result<()> {
    println!("{}", render_solutions(ctx));
    Ok(())
}

pub fn render_solutions(ctx: &DeskContext) -> String {
    let summary = ctx.analyzer.summarize(ctx.store.all());
    let guides = solution_guides(&summary.common_solutions);

    if guides.is_empty() {
        return "No attempted solutions recorded".to_string();
    }

    let mut out = String::new();
    for guide in guides {
        let _ = writeln!(out, "{}", guide.problem);
        for solution in guide.solutions {
            let _ = writeln!(
                out,
                "  {} {} ({} success rate)",
                if solution.reliable { "+" } else { "-" },
                solution.description,
                format_rate(solution.success_rate)
            );
            for (index, step) in solution.steps.iter().enumerate() {
                let _ = writeln!(out, "      {}. {}", index + 1, step);
            }
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}
