//! Shared state for command handlers

use chrono::{DateTime, Utc};
use tracing::info;

use crate::analytics::{ReportingZone, TicketAnalyzer};
use crate::config::DeskConfig;
use crate::error::Result;
use crate::tickets::{sample_tickets, TicketStore};

/// Configuration, tickets and analyzer for one CLI invocation
pub struct DeskContext {
    pub config: DeskConfig,
    pub store: TicketStore,
    pub analyzer: TicketAnalyzer,
    /// Reference time for relative timestamps and sample data
    pub now: DateTime<Utc>,
}

impl DeskContext {
    /// Load tickets from the configured data file, or generate the sample set
    pub fn load(config: DeskConfig, now: DateTime<Utc>) -> Result<Self> {
        let store = match &config.data_file {
            Some(path) => TicketStore::load(path, config.strict_validation)?,
            None => {
                info!(
                    "No data file configured, using sample tickets (seed {})",
                    config.sample_seed
                );
                TicketStore::from_tickets(
                    sample_tickets(config.sample_seed, now),
                    config.strict_validation,
                )?
            }
        };

        Ok(Self::from_store(config, store, now))
    }

    pub fn from_store(config: DeskConfig, store: TicketStore, now: DateTime<Utc>) -> Self {
        let analyzer = TicketAnalyzer::new()
            .with_zone(config.reporting_zone())
            .with_settings(config.analyzer_settings());

        Self {
            config,
            store,
            analyzer,
            now,
        }
    }

    pub fn zone(&self) -> ReportingZone {
        self.analyzer.zone()
    }
}

/// Sample tickets at a fixed reference time, bucketed in UTC
#[cfg(test)]
pub(crate) fn sample_context() -> DeskContext {
    let now = crate::testing::fixtures::TicketBuilder::base_day();
    let mut config = DeskConfig::default();
    config.analytics.utc_offset_minutes = Some(0);

    let store = TicketStore::from_tickets(sample_tickets(config.sample_seed, now), true)
        .unwrap_or_default();
    DeskContext::from_store(config, store, now)
}
