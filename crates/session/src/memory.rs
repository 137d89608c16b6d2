//! In-memory session
//!
//! Mirrors the behavior of a request-scoped framework session: it must be
//! started before use, and every operation on an inactive session fails with
//! `Error::NotStarted`. Entries are kept in a `BTreeMap` so `keys()` and
//! dumps come out in a stable order.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::{Error, Result, Session};

#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    started: bool,
    entries: BTreeMap<String, Value>,
}

impl MemorySession {
    /// Create an inactive, empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inactive session pre-populated with `entries`, e.g. from a dump.
    pub fn from_entries(entries: BTreeMap<String, Value>) -> Self {
        Self {
            started: false,
            entries,
        }
    }

    /// Build a session from a JSON object of name to value.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_entries(map.into_iter().collect())),
            other => Err(Error::Serialization(format!(
                "session dump must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Snapshot of the current entries as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Read-only view of the raw entries, without the started check.
    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_started(&self) -> Result<()> {
        if self.started {
            Ok(())
        } else {
            Err(Error::NotStarted)
        }
    }
}

impl Session for MemorySession {
    type Error = Error;

    fn start(&mut self) -> Result<()> {
        if !self.started {
            self.started = true;
            debug!(entries = self.entries.len(), "session started");
        }
        Ok(())
    }

    fn is_started(&self) -> bool {
        self.started
    }

    fn has(&self, name: &str) -> Result<bool> {
        self.ensure_started()?;
        Ok(self.entries.contains_key(name))
    }

    fn get(&self, name: &str) -> Result<Option<Value>> {
        self.ensure_started()?;
        Ok(self.entries.get(name).cloned())
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.ensure_started()?;
        self.entries.insert(name.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<Option<Value>> {
        self.ensure_started()?;
        Ok(self.entries.remove(name))
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.ensure_started()?;
        Ok(self.entries.keys().cloned().collect())
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
