//! Error types for artifact persistence

use std::fmt;

/// Store operation that can reject a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Set,
    Get,
    Clear,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Set => "set",
            Operation::Get => "get",
            Operation::Clear => "clear",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from artifact persistence.
///
/// `UnsupportedKey` is only ever logged by the store: a bad key must not
/// abort the host's login flow. Session failures are not wrapped here; they
/// reach the caller as the session's own error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported key passed to {operation}: {key}")]
    UnsupportedKey { key: String, operation: Operation },

    #[error("unknown artifact: {0}")]
    UnknownArtifact(String),
}
