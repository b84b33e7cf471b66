//! Aggregates
pub mod ticket;
pub mod agent;
pub use ticket::{Comment, Ticket, TicketError, TicketRecord};
pub use agent::{Agent, AgentError};
