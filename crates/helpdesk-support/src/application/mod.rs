//! Application layer
//!
//! Services orchestrate the ports; all arithmetic lives in `reporting`.

pub mod agents;
pub mod reports;
pub mod tickets;

pub use agents::{AgentChanges, AgentService, NewAgent};
pub use reports::{ReportService, ReportWindows};
pub use tickets::{NewTicket, TicketChanges, TicketService};
