//! Event-type to provisioning-action mapping.
//!
//! A static table, not pattern matching: unknown event types resolve to
//! "no action" and the caller ignores the event instead of failing. The
//! table is validated at startup against the known [`EventType`] enum so a
//! typo in a key cannot silently drop every matching event. Extending the
//! table never touches extraction or transport code.

use std::collections::HashMap;

use espf_events::EventType;
use wtl_client::WtlAction;

/// Mapping from event-type strings to WTL provisioning actions.
#[derive(Debug, Clone)]
pub struct ActionMap {
    table: HashMap<String, WtlAction>,
}

impl ActionMap {
    /// The standard mapping for this connector.
    ///
    /// Multiple event types may map to the same action; types without an
    /// entry are deliberately unprovisioned.
    pub fn standard() -> Self {
        let mut table = HashMap::new();
        table.insert(EventType::SimUpdated.as_str().to_string(), WtlAction::Update);
        Self { table }
    }

    /// Create an empty mapping (for tests and custom deployments).
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Add or replace a mapping entry.
    pub fn with_mapping(mut self, event_type: impl Into<String>, action: WtlAction) -> Self {
        self.table.insert(event_type.into(), action);
        self
    }

    /// Look up the action for an event type. `None` means the event is to
    /// be ignored, not failed.
    pub fn action_for(&self, event_type: &str) -> Option<WtlAction> {
        self.table.get(event_type).copied()
    }

    /// Validate every table key against the known event-type enum.
    ///
    /// Run at startup so a misspelled key is a deploy-time error rather
    /// than an unnoticed stream of ignored events.
    pub fn validate(&self) -> Result<(), String> {
        let unknown: Vec<&str> = self
            .table
            .keys()
            .filter(|key| EventType::parse(key).is_none())
            .map(String::as_str)
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Action mapping contains unknown event types: {}",
                unknown.join(", ")
            ))
        }
    }

    /// Number of mapped event types.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for ActionMap {
    fn default() -> Self {
        Self::standard()
    }
}
