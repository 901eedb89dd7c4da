//! Test fixtures and data builders

pub mod builders;

pub use builders::TicketBuilder;
