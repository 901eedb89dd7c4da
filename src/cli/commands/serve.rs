//! `ticketdesk serve`

use anyhow::Result;
use std::sync::Arc;

use super::context::DeskContext;
use crate::analytics::{SummaryCache, TicketApiServer};

pub async fn run_serve_command(
    ctx: DeskContext,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = port.unwrap_or(ctx.config.server.port);
    let cache = SummaryCache::new(ctx.analyzer, ctx.config.cache_capacity());

    let server = TicketApiServer::new(Arc::new(ctx.store), Arc::new(cache), &host, port);
    println!("Serving ticket API on http://{}", server.address());
    server.start().await?;
    Ok(())
}
