//! Bounded handoff list between calculators.
//!
//! A producing calculator pushes its computed result; the Harvest calculator
//! reads the list (newest first) and may clear it. The list lives under one
//! storage key as a JSON array and never holds more than `capacity` entries.
//!
//! Nothing here raises. Storage and serialization failures are logged and
//! reported as [`Outcome::Degraded`], because a failed handoff must never
//! break the calculator that attempted it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hoa_core::config::HarvestConfig;
//! use hoa_harvest::{HarvestStore, MemoryStorage};
//! use serde_json::json;
//!
//! let store = HarvestStore::new(Arc::new(MemoryStorage::new()), &HarvestConfig::default());
//! store.push(&json!({"calc": "ec", "value": 1.8}));
//! store.push(&json!({"calc": "ph", "value": 6.1}));
//!
//! let payloads = store.payloads().into_value();
//! assert_eq!(payloads[0]["calc"], "ph");
//! ```

use std::sync::Arc;

use hoa_core::config::HarvestConfig;
use hoa_core::{Error, Outcome, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::storage::StorageBackend;

/// Buffered notifications per subscriber before older ones are dropped.
const EVENT_BUFFER: usize = 16;

/// Notification sent to subscribers after the stored list changes.
///
/// Carries no payload; listeners re-read the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestEvent {
    /// A payload was pushed
    Updated,
    /// The list was cleared
    Cleared,
}

/// Newest-first, capacity-bounded payload list.
pub struct HarvestStore {
    storage: Arc<dyn StorageBackend>,
    key: String,
    capacity: usize,
    events: broadcast::Sender<HarvestEvent>,
}

impl HarvestStore {
    /// Creates a store using the configured key and capacity.
    pub fn new(storage: Arc<dyn StorageBackend>, config: &HarvestConfig) -> Self {
        Self::with_key(storage, config.storage_key.clone(), config.capacity)
    }

    /// Creates a store under an explicit key and capacity.
    pub fn with_key(storage: Arc<dyn StorageBackend>, key: impl Into<String>, capacity: usize) -> Self {
        let (events, _rx) = broadcast::channel(EVENT_BUFFER);
        Self {
            storage,
            key: key.into(),
            capacity: capacity.max(1),
            events,
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Maximum number of payloads kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<HarvestEvent> {
        self.events.subscribe()
    }

    /// Prepend `payload`, keep the newest `capacity` entries, and notify.
    ///
    /// A corrupt stored list is replaced, which is reported as degraded. If
    /// storage cannot be read at all, nothing is written.
    pub fn push<T: Serialize + ?Sized>(&self, payload: &T) -> Outcome<()> {
        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => return self.push_failed(e.into()),
        };

        // A failed read leaves the stored list untouched.
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw,
            Err(e) => return self.push_failed(e),
        };
        let (mut list, discarded) = match parse_list(raw.as_deref()) {
            Ok(list) => (list, None),
            Err(e) => (Vec::new(), Some(e)),
        };
        if let Some(e) = &discarded {
            tracing::warn!(key = %self.key, error = %e, "Discarding unreadable harvest list");
        }

        list.insert(0, payload);
        list.truncate(self.capacity);

        if let Err(e) = self.write_list(&list) {
            return self.push_failed(e);
        }

        tracing::debug!(key = %self.key, count = list.len(), "Pushed harvest payload");
        self.notify(HarvestEvent::Updated);

        match discarded {
            Some(e) => Outcome::degraded((), format!("replaced unreadable stored list: {e}")),
            None => Outcome::Complete(()),
        }
    }

    /// The stored payloads, newest first; empty on any failure.
    pub fn payloads(&self) -> Outcome<Vec<Value>> {
        match self.read_list() {
            Ok(list) => Outcome::Complete(list),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Unable to read harvest list");
                Outcome::degraded(Vec::new(), e.to_string())
            }
        }
    }

    /// Remove every stored payload and notify.
    pub fn clear(&self) -> Outcome<()> {
        match self.storage.remove(&self.key) {
            Ok(()) => {
                self.notify(HarvestEvent::Cleared);
                Outcome::Complete(())
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Unable to clear harvest list");
                Outcome::degraded((), e.to_string())
            }
        }
    }

    fn read_list(&self) -> Result<Vec<Value>> {
        let raw = self.storage.get(&self.key)?;
        parse_list(raw.as_deref())
    }

    fn write_list(&self, list: &[Value]) -> Result<()> {
        let raw = serde_json::to_string(list)?;
        self.storage.set(&self.key, &raw)
    }

    fn push_failed(&self, error: Error) -> Outcome<()> {
        tracing::warn!(key = %self.key, error = %error, "Harvest push failed");
        Outcome::degraded((), error.to_string())
    }

    fn notify(&self, event: HarvestEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}

/// Decode a stored list; a missing value is an empty list.
fn parse_list(raw: Option<&str>) -> Result<Vec<Value>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(list) => Ok(list),
        other => Err(Error::storage(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl std::fmt::Debug for HarvestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestStore")
            .field("key", &self.key)
            .field("capacity", &self.capacity)
            .finish()
    }
}
