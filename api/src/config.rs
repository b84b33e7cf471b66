//! Service configuration
//!
//! Read from a JSON file at `CONFIG_PATH` (default `/etc/helpdesk/api.json`).
//! Every field is optional; `HELPDESK_BIND_ADDR` overrides the listen address.

use helpdesk_support::{ReportWindows, SlaPolicy};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/helpdesk/api.json";

/// Longest accepted SLA deadline: ten years
pub const MAX_DEADLINE_HOURS: u32 = 24 * 366 * 10;

/// API service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address
    pub bind_addr: String,
    /// Optional `{ "tickets": [...], "agents": [...] }` file loaded at startup
    pub seed_path: Option<String>,
    /// Resolution deadlines per priority
    pub sla: SlaPolicy,
    /// Report window lengths in days
    pub reports: ReportWindows,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            seed_path: None,
            sla: SlaPolicy::default(),
            reports: ReportWindows::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from `CONFIG_PATH`, falling back to defaults when the file is
    /// missing or unreadable, then apply environment overrides.
    pub fn from_env() -> Self {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let config = Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path, error = %e, "config not loaded, using defaults");
            Self::default()
        });
        config.with_overrides(std::env::var("HELPDESK_BIND_ADDR").ok())
    }

    pub fn with_overrides(mut self, bind_addr: Option<String>) -> Self {
        if let Some(addr) = bind_addr.filter(|a| !a.trim().is_empty()) {
            self.bind_addr = addr;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid(format!("bind_addr {:?} is not a socket address", self.bind_addr)))?;
        let sla = &self.sla;
        let deadlines = [sla.urgent_hours, sla.high_hours, sla.medium_hours, sla.low_hours];
        if deadlines.contains(&0) {
            return Err(ConfigError::Invalid("sla deadlines must be at least one hour".into()));
        }
        if deadlines.iter().any(|h| *h > MAX_DEADLINE_HOURS) {
            return Err(ConfigError::Invalid(format!("sla deadlines must not exceed {MAX_DEADLINE_HOURS} hours")));
        }
        if self.reports.trend_days == 0 || self.reports.activity_days == 0 {
            return Err(ConfigError::Invalid("report windows must be at least one day".into()));
        }
        Ok(())
    }
}
