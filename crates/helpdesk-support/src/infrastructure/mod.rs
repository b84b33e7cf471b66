//! Infrastructure adapters

pub mod persistence;
pub mod snapshot;

pub use persistence::{InMemoryAgentRepository, InMemoryTicketRepository, TracingEventPublisher};
pub use snapshot::{Snapshot, SnapshotError};
