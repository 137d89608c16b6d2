//! Session collaborator abstraction
//!
//! Defines the `Session` trait: the per-user key/value store that OAuth
//! artifact persistence writes into. The store itself (cookie-backed, server
//! side, whatever the host framework provides) is owned by the host; this
//! crate only fixes the operations the artifact layer relies on.
//!
//! `MemorySession` is an in-process implementation used by tests and by the
//! inspection tool when it loads a session dump.

pub mod memory;

pub use memory::MemorySession;

use serde_json::Value;

/// Errors raised by the bundled session implementations.
///
/// Host-provided sessions bring their own error type through
/// `Session::Error`; nothing above this layer translates it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("session has not been started")]
    NotStarted,

    #[error("session serialization failed: {0}")]
    Serialization(String),
}

/// Result alias for the bundled session implementations.
pub type Result<T> = std::result::Result<T, Error>;

/// Key/value store scoped to one user's ongoing interaction.
///
/// Operations are synchronous. Concurrency across requests sharing one
/// session id (last write wins, locking, expiry) is the implementor's
/// business.
pub trait Session {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Activate the session if it is not active yet. Must be idempotent.
    fn start(&mut self) -> std::result::Result<(), Self::Error>;

    fn is_started(&self) -> bool;

    fn has(&self, name: &str) -> std::result::Result<bool, Self::Error>;

    fn get(&self, name: &str) -> std::result::Result<Option<Value>, Self::Error>;

    /// Store `value` under `name`, replacing any previous value.
    fn set(&mut self, name: &str, value: Value) -> std::result::Result<(), Self::Error>;

    /// Remove `name`, returning the previous value. Absent names are not an error.
    fn remove(&mut self, name: &str) -> std::result::Result<Option<Value>, Self::Error>;

    /// Names of every entry currently held.
    fn keys(&self) -> std::result::Result<Vec<String>, Self::Error>;

    /// Every `(name, value)` pair currently held.
    fn all(&self) -> std::result::Result<Vec<(String, Value)>, Self::Error> {
        let mut pairs = Vec::new();
        for name in self.keys()? {
            if let Some(value) = self.get(&name)? {
                pairs.push((name, value));
            }
        }
        Ok(pairs)
    }
}
