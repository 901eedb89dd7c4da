//! In-memory ticket collection and the views derived from it

use super::models::{Priority, Status, Ticket};
use crate::error::{common, DeskError, ErrorCode, Result};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Serialization formats understood for ticket files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketFormat {
    Json,
    Yaml,
}

impl TicketFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(common::unsupported_format(path)),
        }
    }

    pub fn parse(&self, content: &str) -> Result<Vec<Ticket>> {
        let tickets = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| {
                DeskError::storage_with_code(
                    ErrorCode::STORAGE_DESERIALIZATION_ERROR,
                    "Invalid ticket JSON",
                    None,
                )
                .with_source(e)
            })?,
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| {
                DeskError::storage_with_code(
                    ErrorCode::STORAGE_DESERIALIZATION_ERROR,
                    "Invalid ticket YAML",
                    None,
                )
                .with_source(e)
            })?,
        };
        Ok(tickets)
    }

    pub fn render(&self, tickets: &[Ticket]) -> Result<String> {
        let rendered = match self {
            Self::Json => serde_json::to_string_pretty(tickets).map_err(|e| {
                DeskError::storage_with_code(
                    ErrorCode::STORAGE_SERIALIZATION_ERROR,
                    "Failed to serialize tickets as JSON",
                    None,
                )
                .with_source(e)
            })?,
            Self::Yaml => serde_yaml::to_string(tickets).map_err(|e| {
                DeskError::storage_with_code(
                    ErrorCode::STORAGE_SERIALIZATION_ERROR,
                    "Failed to serialize tickets as YAML",
                    None,
                )
                .with_source(e)
            })?,
        };
        Ok(rendered)
    }
}

/// Ordered, immutable collection of tickets
#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
}

impl TicketStore {
    /// Build a store, rejecting duplicate ids.
    ///
    /// Lifecycle violations are logged, or rejected when `strict` is set.
    pub fn from_tickets(tickets: Vec<Ticket>, strict: bool) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tickets.len());

        for ticket in &tickets {
            if !seen.insert(ticket.id.as_str()) {
                return Err(common::duplicate_ticket(&ticket.id));
            }

            let violations = ticket.lifecycle_violations();
            if violations.is_empty() {
                continue;
            }
            if strict {
                return Err(DeskError::validation_with_code(
                    ErrorCode::VALIDATION_CONSTRAINT_VIOLATION,
                    violations.join("; "),
                    Some(ticket.id.clone()),
                ));
            }
            for violation in violations {
                warn!("Ticket {}: {}", ticket.id, violation);
            }
        }

        debug!("Built ticket store with {} tickets", tickets.len());
        Ok(Self { tickets })
    }

    /// Load tickets from a JSON or YAML file
    pub fn load(path: &Path, strict: bool) -> Result<Self> {
        let format = TicketFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| DeskError::from(e).with_path(path))?;
        let tickets = format.parse(&content).map_err(|e| e.with_path(path))?;

        info!("Loaded {} tickets from {}", tickets.len(), path.display());
        Self::from_tickets(tickets, strict)
    }

    /// Write the collection in the format implied by the file extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = TicketFormat::from_path(path)?;
        let rendered = format.render(&self.tickets)?;
        fs::write(path, rendered).map_err(|e| DeskError::from(e).with_path(path))?;

        info!("Wrote {} tickets to {}", self.tickets.len(), path.display());
        Ok(())
    }

    pub fn all(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Like [`TicketStore::get`] but reports a missing id as an error
    pub fn require(&self, id: &str) -> Result<&Ticket> {
        self.get(id).ok_or_else(|| common::ticket_not_found(id))
    }

    /// Open and in-progress tickets in input order
    pub fn active_queue(&self) -> Vec<&Ticket> {
        self.tickets.iter().filter(|t| t.is_active()).collect()
    }

    /// Resolved tickets in input order
    pub fn history(&self) -> Vec<&Ticket> {
        self.tickets.iter().filter(|t| t.is_resolved()).collect()
    }

    /// Most recently resolved tickets, newest first
    pub fn recently_closed(&self, limit: usize) -> Vec<&Ticket> {
        let mut closed: Vec<&Ticket> = self
            .tickets
            .iter()
            .filter(|t| t.is_resolved() && t.resolved_at.is_some())
            .collect();
        closed.sort_by_key(|t| Reverse(t.resolved_at));
        closed.truncate(limit);
        closed
    }

    /// Unresolved tickets, most urgent first; equal priorities keep input order
    pub fn current_open(&self, limit: usize) -> Vec<&Ticket> {
        let mut open = self.active_queue();
        open.sort_by_key(|t| Reverse(t.priority));
        open.truncate(limit);
        open
    }

    pub fn filter(&self, status: Option<Status>, priority: Option<Priority>) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .filter(|t| priority.map_or(true, |p| t.priority == p))
            .collect()
    }

    /// Resolve a ticket's `similar_tickets` ids, skipping unknown ones
    pub fn similar_to(&self, id: &str) -> Result<Vec<&Ticket>> {
        let ticket = self.require(id)?;
        Ok(ticket
            .similar_tickets
            .iter()
            .filter_map(|similar| self.get(similar))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::TicketBuilder;
    use chrono::Duration;
    use tempfile::TempDir;

    fn mixed_store() -> TicketStore {
        let base = TicketBuilder::base_day();
        TicketStore::from_tickets(
            vec![
                TicketBuilder::new("1")
                    .with_priority(Priority::Low)
                    .with_similar(&["3", "missing"])
                    .build(),
                TicketBuilder::new("2")
                    .with_priority(Priority::Critical)
                    .with_status(Status::InProgress)
                    .build(),
                TicketBuilder::new("3")
                    .resolved(30)
                    .resolved_at(base + Duration::hours(5))
                    .build(),
                TicketBuilder::new("4")
                    .with_priority(Priority::High)
                    .build(),
                TicketBuilder::new("5")
                    .resolved(60)
                    .resolved_at(base + Duration::hours(9))
                    .build(),
                TicketBuilder::new("6")
                    .with_priority(Priority::High)
                    .build(),
            ],
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_active_queue_and_history_partition() {
        let store = mixed_store();
        let active: Vec<&str> = store.active_queue().iter().map(|t| t.id.as_str()).collect();
        let history: Vec<&str> = store.history().iter().map(|t| t.id.as_str()).collect();

        assert_eq!(active, vec!["1", "2", "4", "6"]);
        assert_eq!(history, vec!["3", "5"]);
    }

    #[test]
    fn test_recently_closed_newest_first() {
        let store = mixed_store();
        let closed: Vec<&str> = store
            .recently_closed(3)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(closed, vec!["5", "3"]);
        assert_eq!(store.recently_closed(1).len(), 1);
    }

    #[test]
    fn test_current_open_orders_by_priority_stably() {
        let store = mixed_store();
        let open: Vec<&str> = store
            .current_open(3)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(open, vec!["2", "4", "6"]);
    }

    #[test]
    fn test_filter_by_status_and_priority() {
        let store = mixed_store();
        assert_eq!(store.filter(Some(Status::Open), None).len(), 3);
        assert_eq!(store.filter(None, Some(Priority::High)).len(), 2);
        assert_eq!(
            store
                .filter(Some(Status::InProgress), Some(Priority::Critical))
                .len(),
            1
        );
        assert_eq!(store.filter(None, None).len(), 6);
    }

    #[test]
    fn test_similar_to_skips_unknown_ids() {
        let store = mixed_store();
        let similar = store.similar_to("1").unwrap();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].id, "3");

        let err = store.similar_to("nope").unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_TICKET_NOT_FOUND);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = TicketStore::from_tickets(
            vec![TicketBuilder::new("1").build(), TicketBuilder::new("1").build()],
            false,
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_DUPLICATE_VALUE);
    }

    #[test]
    fn test_strict_mode_rejects_lifecycle_violations() {
        let mut broken = TicketBuilder::new("1").resolved(10).build();
        broken.actual_time = None;

        assert!(TicketStore::from_tickets(vec![broken.clone()], false).is_ok());

        let err = TicketStore::from_tickets(vec![broken], true).unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_CONSTRAINT_VIOLATION);
    }

    #[test]
    fn test_save_and_load_json_and_yaml() {
        let temp = TempDir::new().unwrap();
        let store = mixed_store();

        for name in ["tickets.json", "tickets.yaml"] {
            let path = temp.path().join(name);
            store.save(&path).unwrap();
            let loaded = TicketStore::load(&path, true).unwrap();
            assert_eq!(loaded.all(), store.all());
        }
    }

    #[test]
    fn test_load_errors() {
        let temp = TempDir::new().unwrap();

        let err = TicketStore::load(&temp.path().join("tickets.csv"), false).unwrap_err();
        assert_eq!(err.code(), ErrorCode::STORAGE_UNSUPPORTED_FORMAT);

        let err = TicketStore::load(&temp.path().join("absent.json"), false).unwrap_err();
        assert_eq!(err.code(), ErrorCode::STORAGE_NOT_FOUND);

        let bad = temp.path().join("bad.json");
        fs::write(&bad, "[{\"id\": 1}]").unwrap();
        let err = TicketStore::load(&bad, false).unwrap_err();
        assert_eq!(err.code(), ErrorCode::STORAGE_DESERIALIZATION_ERROR);
        assert!(err.user_message().contains("bad.json"));
    }
}
