//! `ticketdesk generate`

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::config::DeskConfig;
use crate::tickets::{sample_tickets, TicketFormat, TicketStore};

pub fn run_generate_command(
    config: &DeskConfig,
    seed: Option<u64>,
    output: Option<&Path>,
    now: DateTime<Utc>,
) -> Result<()> {
    let seed = seed.unwrap_or(config.sample_seed);
    let store = TicketStore::from_tickets(sample_tickets(seed, now), true)?;

    match output {
        Some(path) => {
            store.save(path)?;
            println!(
                "Wrote {} sample tickets (seed {}) to {}",
                store.len(),
                seed,
                path.display()
            );
        }
        None => println!("{}", TicketFormat::Json.render(store.all())?),
    }
    Ok(())
}
