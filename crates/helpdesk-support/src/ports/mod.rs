//! Ports (hexagonal architecture)
//!
//! Stores are external collaborators; the aggregator only ever sees the
//! snapshots they hand out.

pub mod outbound;
