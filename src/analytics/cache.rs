//! Memoized ticket summaries keyed by collection content

use lru::LruCache;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::engine::TicketAnalyzer;
use super::models::TicketStatsSummary;
use crate::error::{DeskError, ErrorCode, Result};
use crate::tickets::Ticket;

/// Hit and miss counters for a [`SummaryCache`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

struct CacheState {
    entries: LruCache<String, Arc<TicketStatsSummary>>,
    hits: u64,
    misses: u64,
}

/// Caches [`TicketAnalyzer::summarize`] results by a SHA-256 fingerprint of
/// the serialized tickets, so an unchanged collection is only aggregated once.
pub struct SummaryCache {
    analyzer: TicketAnalyzer,
    state: Mutex<CacheState>,
}

impl SummaryCache {
    pub fn new(analyzer: TicketAnalyzer, capacity: NonZeroUsize) -> Self {
        Self {
            analyzer,
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn analyzer(&self) -> &TicketAnalyzer {
        &self.analyzer
    }

    /// Content fingerprint of a ticket collection
    pub fn fingerprint(tickets: &[Ticket]) -> Result<String> {
        let bytes = serde_json::to_vec(tickets).map_err(|e| {
            DeskError::storage_with_code(
                ErrorCode::STORAGE_SERIALIZATION_ERROR,
                "Failed to fingerprint tickets",
                None,
            )
            .with_source(e)
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Return the cached summary for `tickets`, computing it on a miss
    pub async fn get_or_compute(&self, tickets: &[Ticket]) -> Result<Arc<TicketStatsSummary>> {
        let key = Self::fingerprint(tickets)?;
        let mut state = self.state.lock().await;

        if let Some(summary) = state.entries.get(&key).cloned() {
            state.hits += 1;
            debug!("Summary cache hit for {}", &key[..12]);
            return Ok(summary);
        }

        state.misses += 1;
        debug!("Summary cache miss for {}", &key[..12]);
        let summary = Arc::new(self.analyzer.summarize(tickets));
        state.entries.put(key, Arc::clone(&summary));
        Ok(summary)
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
            capacity: state.entries.cap().get(),
        }
    }

    /// Drop every cached summary and reset the counters
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
    }
}
