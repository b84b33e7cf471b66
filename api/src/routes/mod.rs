//! API route handlers

pub mod agents;
pub mod dashboard;
pub mod health;
pub mod reports;
pub mod tickets;
