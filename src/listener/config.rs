//! Listener registrations loaded from a JSON file at bootstrap.
//!
//! ```json
//! {
//!   "listeners": [
//!     { "event": "resource.file.metadata.updated", "service": "search.indexer" },
//!     {
//!       "identifier": "audit",
//!       "event": "resource.file.metadata.updated",
//!       "service": "audit.logger",
//!       "method": "onMetaDataUpdated",
//!       "before": ["search.indexer"]
//!     }
//!   ]
//! }
//! ```

use std::borrow::Cow;
use std::path::Path;

use log::debug;
use log::info;
use serde::Deserialize;
use serde::Serialize;

use crate::listener::error::ListenerConfigError;
use crate::listener::ordering::Ordered;
use crate::listener::ordering::order_by_dependencies;
use crate::listener::provider::ListenerProvider;

/// One configured listener.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerEntry {
    /// Name used by other entries' `before` / `after`; defaults to `service`,
    /// or `service::method` when a method is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub event: String,
    pub service: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
}

impl Ordered for ListenerEntry {
    fn identifier(&self) -> Cow<'_, str> {
        match (&self.identifier, &self.method) {
            (Some(identifier), _) => Cow::Borrowed(identifier),
            (None, Some(method)) => Cow::Owned(format!("{}::{method}", self.service)),
            (None, None) => Cow::Borrowed(&self.service),
        }
    }

    fn before(&self) -> &[String] {
        &self.before
    }

    fn after(&self) -> &[String] {
        &self.after
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerConfig {
    #[serde(default)]
    pub listeners: Vec<ListenerEntry>,
}

impl ListenerConfig {
    pub fn from_path(path: &Path) -> Result<Self, ListenerConfigError> {
        debug!("Loading listener configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ListenerConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Entries grouped by event (in order of first appearance), each group
    /// ordered by its `before` / `after` constraints.
    pub fn ordered(&self) -> Result<Vec<&ListenerEntry>, ListenerConfigError> {
        let mut events: Vec<&str> = Vec::new();
        for entry in &self.listeners {
            if !events.contains(&entry.event.as_str()) {
                events.push(&entry.event);
            }
        }

        let mut ordered = Vec::with_capacity(self.listeners.len());
        for event in events {
            let group: Vec<&ListenerEntry> = self
                .listeners
                .iter()
                .filter(|entry| entry.event == event)
                .collect();
            ordered.extend(order_by_dependencies(&group)?.into_iter().copied());
        }
        Ok(ordered)
    }

    /// Adds every entry to `provider` in dependency order.
    pub fn register(&self, provider: &mut ListenerProvider) -> Result<usize, ListenerConfigError> {
        let ordered = self.ordered()?;
        for entry in &ordered {
            provider.add_listener(&entry.event, &entry.service, entry.method.as_deref());
        }
        info!("Registered {} event listener(s).", ordered.len());
        Ok(ordered.len())
    }
}
