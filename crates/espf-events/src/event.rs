//! Event envelope types.
//!
//! An enriched event is delivered once per HTTP request. The `event_id` is
//! stable across upstream redeliveries of the same logical event; the
//! connector itself never persists it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pb_data::PbData;

/// Event types with a known meaning for this connector.
///
/// The inbound `event_type` field stays an open string (new types must be
/// deliverable without a model change); this enum exists so action-mapping
/// tables can be checked for typos at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// SIM card data changed (`SIM/Updated`).
    SimUpdated,
    /// SIM card provisioned (`SIM/Created`).
    SimCreated,
    /// SIM card removed (`SIM/Deleted`).
    SimDeleted,
}

impl EventType {
    /// All known event types.
    pub const ALL: [EventType; 3] = [
        EventType::SimUpdated,
        EventType::SimCreated,
        EventType::SimDeleted,
    ];

    /// The wire representation of this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::SimUpdated => "SIM/Updated",
            EventType::SimCreated => "SIM/Created",
            EventType::SimDeleted => "SIM/Deleted",
        }
    }

    /// Parse a wire event-type string. Unknown strings return `None`;
    /// they are not an error (the caller ignores unmapped types).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The original ESPF notification: a type tag plus an open bag of
/// event-specific variables passed through as-is by the upstream system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EspfEvent {
    /// The type of the event (e.g. `SIM/Updated`).
    pub event_type: String,

    /// All event variables, keyed by name. The set of keys varies per
    /// event type, so this stays an open mapping with typed accessors
    /// rather than a closed schema.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub variables: serde_json::Map<String, Value>,
}

impl EspfEvent {
    /// Look up a string-valued variable.
    pub fn var_str(&self, key: &str) -> Option<&str> {
        self.variables.get(key).and_then(Value::as_str)
    }

    /// Look up an integer-valued variable.
    pub fn var_i64(&self, key: &str) -> Option<i64> {
        self.variables.get(key).and_then(Value::as_i64)
    }

    /// Look up a boolean-valued variable.
    pub fn var_bool(&self, key: &str) -> Option<bool> {
        self.variables.get(key).and_then(Value::as_bool)
    }
}

/// The enriched event envelope as delivered by the upstream system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Event {
    /// Unique identifier of the event. Stable across redeliveries of the
    /// same logical event.
    pub event_id: String,

    /// Event data containing the type tag and variables.
    pub data: EspfEvent,

    /// ID of the handler processing this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_id: Option<String>,

    /// When the event was created (ISO datetime string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// When the event was last updated (ISO datetime string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Current status of the event in the upstream queue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// PortaBilling enrichment data. Optional and partial by design.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pb_data: Option<PbData>,
}
