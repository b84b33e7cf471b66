//! Support value objects
//!
//! Statuses and priorities are closed enums with one canonical wire form.
//! Text coming from outside (API payloads, snapshot files) is mapped through
//! the `FromStr` tables below and nowhere else.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self { Self(Uuid::new_v4()) }
            pub fn from_uuid(id: Uuid) -> Self { Self(id) }
            pub fn as_uuid(&self) -> &Uuid { &self.0 }
        }

        impl Default for $name {
            fn default() -> Self { Self::new() }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
        }
    };
}

entity_id!(
    /// Ticket identifier
    TicketId
);
entity_id!(
    /// Agent identifier
    AgentId
);
entity_id!(
    /// Comment identifier
    CommentId
);

/// Error for text that maps to no variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Lowercases and folds `_`, ` ` to `-` so that "In Progress", "IN_PROGRESS"
/// and "in-progress" compare equal.
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Display, serde and (with `openapi`) a string-enum schema, all driven by
/// `as_str` over the listed variants.
macro_rules! wire_enum_serde {
    ($name:ident, $all:expr) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        #[cfg(feature = "openapi")]
        impl<'__s> utoipa::ToSchema<'__s> for $name {
            fn schema() -> (&'__s str, utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>) {
                let object = utoipa::openapi::schema::ObjectBuilder::new()
                    .schema_type(utoipa::openapi::schema::SchemaType::String)
                    .enum_values(Some($all.iter().map(|v| v.as_str())))
                    .build();
                (stringify!($name), utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(object)))
            }
        }
    };
}

// ============ Priority ============

/// Ticket priority, ordered low < medium < high < urgent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    /// Sort rank used by triage ordering (urgent=4 .. low=1)
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(ParseEnumError { kind: "priority", value: s.to_string() }),
        }
    }
}

wire_enum_serde!(Priority, Priority::ALL);

// ============ Ticket status ============

/// Ticket workflow status; declaration order is the workflow order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicketStatus {
    #[default]
    Open,
    PendingReview,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const WORKFLOW: [TicketStatus; 6] = [
        TicketStatus::Open,
        TicketStatus::PendingReview,
        TicketStatus::Assigned,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::PendingReview => "pending-review",
            TicketStatus::Assigned => "assigned",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    /// Backlog membership: anything not yet resolved or closed
    pub fn is_active(self) -> bool {
        !matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }

    /// Next workflow step, `None` once closed
    pub fn next(self) -> Option<TicketStatus> {
        let idx = Self::WORKFLOW.iter().position(|s| *s == self)?;
        Self::WORKFLOW.get(idx + 1).copied()
    }
}

impl FromStr for TicketStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" => Ok(TicketStatus::Open),
            "pending-review" => Ok(TicketStatus::PendingReview),
            "assigned" => Ok(TicketStatus::Assigned),
            "in-progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(ParseEnumError { kind: "ticket status", value: s.to_string() }),
        }
    }
}

wire_enum_serde!(TicketStatus, TicketStatus::WORKFLOW);

// ============ Agent status ============

/// Agent presence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AgentStatus {
    Online,
    Away,
    #[default]
    Offline,
    AtCapacity,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 4] =
        [AgentStatus::Online, AgentStatus::Away, AgentStatus::Offline, AgentStatus::AtCapacity];

    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Online => "online",
            AgentStatus::Away => "away",
            AgentStatus::Offline => "offline",
            AgentStatus::AtCapacity => "at-capacity",
        }
    }
}

impl FromStr for AgentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "online" => Ok(AgentStatus::Online),
            "away" => Ok(AgentStatus::Away),
            "offline" => Ok(AgentStatus::Offline),
            "at-capacity" => Ok(AgentStatus::AtCapacity),
            _ => Err(ParseEnumError { kind: "agent status", value: s.to_string() }),
        }
    }
}

wire_enum_serde!(AgentStatus, AgentStatus::ALL);

// ============ SLA policy ============

/// Hours until a ticket is due, by priority
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaPolicy {
    pub urgent_hours: u32,
    pub high_hours: u32,
    pub medium_hours: u32,
    pub low_hours: u32,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self { urgent_hours: 4, high_hours: 24, medium_hours: 72, low_hours: 168 }
    }
}

impl SlaPolicy {
    pub fn deadline_hours(&self, priority: Priority) -> u32 {
        match priority {
            Priority::Urgent => self.urgent_hours,
            Priority::High => self.high_hours,
            Priority::Medium => self.medium_hours,
            Priority::Low => self.low_hours,
        }
    }

    /// `None` when the deadline lies past the representable date range
    pub fn due_at(&self, created_at: DateTime<Utc>, priority: Priority) -> Option<DateTime<Utc>> {
        created_at.checked_add_signed(Duration::hours(i64::from(self.deadline_hours(priority))))
    }
}
