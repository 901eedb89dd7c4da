//! Ticket data model, the store that holds a collection of tickets, and the
//! sample data generator.

pub mod models;
pub mod sample;
pub mod store;

pub use models::{AttemptedSolution, Channel, OriginMessage, Priority, Status, Ticket};
pub use sample::{sample_tickets, SampleGenerator, SAMPLE_SIZE};
pub use store::{TicketFormat, TicketStore};
