use super::{DeskError, ErrorCode};
use std::path::Path;

/// Helper functions for common error scenarios
pub mod common {
    use super::*;

    /// Create a not found error for a configuration file
    pub fn config_not_found(path: impl AsRef<Path>) -> DeskError {
        DeskError::config_with_code(
            ErrorCode::CONFIG_NOT_FOUND,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
    }

    /// Create an error for a ticket file whose extension is not understood
    pub fn unsupported_format(path: impl AsRef<Path>) -> DeskError {
        let path = path.as_ref();
        DeskError::storage_with_code(
            ErrorCode::STORAGE_UNSUPPORTED_FORMAT,
            "Ticket files must end in .json, .yaml or .yml",
            Some(path.to_path_buf()),
        )
    }

    /// Create a ticket not found error
    pub fn ticket_not_found(ticket_id: &str) -> DeskError {
        DeskError::validation_with_code(
            ErrorCode::VALIDATION_TICKET_NOT_FOUND,
            format!("Ticket '{}' not found", ticket_id),
            Some(ticket_id.to_string()),
        )
    }

    /// Create a duplicate ticket id error
    pub fn duplicate_ticket(ticket_id: &str) -> DeskError {
        DeskError::validation_with_code(
            ErrorCode::VALIDATION_DUPLICATE_VALUE,
            format!("Ticket id '{}' appears more than once", ticket_id),
            Some(ticket_id.to_string()),
        )
    }
}
