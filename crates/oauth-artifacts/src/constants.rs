//! Key layout constants
//!
//! These strings are part of the persisted session layout. Changing any of
//! them orphans artifacts written by earlier requests.

use serde_json::Value;

/// Default namespace prefix for every key the store writes.
pub const DEFAULT_PREFIX: &str = "_fos_facebook_";

/// Segment placed between the prefix and the application id.
pub const KEY_NAMESPACE: &str = "fb";

/// Separator joining namespace, application id and artifact name.
pub const KEY_SEPARATOR: &str = "_";

/// Value the host client treats as "nothing persisted".
pub const MISSING: Value = Value::Bool(false);
