//! Persistence hooks called by the host OAuth client
//!
//! The host's handshake reads and writes its artifacts through these four
//! hooks only. `ArtifactStore` is the session-backed implementation; a host
//! coded against the trait can be pointed at any other backend.

use serde_json::Value;

pub trait PersistentData {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist `value` so later calls to `get_persistent_data(key)` return it,
    /// possibly in a later request.
    fn set_persistent_data(&mut self, key: &str, value: Value) -> Result<(), Self::Error>;

    /// Value persisted for `key`, or `default` when there is none.
    fn get_persistent_data(&self, key: &str, default: Value) -> Result<Value, Self::Error>;

    fn clear_persistent_data(&mut self, key: &str) -> Result<(), Self::Error>;

    fn clear_all_persistent_data(&mut self) -> Result<(), Self::Error>;
}
