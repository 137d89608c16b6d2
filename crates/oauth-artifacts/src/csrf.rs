//! CSRF `state` round trip
//!
//! The login redirect carries a random `state` value that must come back
//! unchanged on the callback. Both halves go through `PersistentData`, so
//! the token lives wherever the other artifacts live.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;
use serde_json::Value;
use tracing::{debug, warn};

use crate::artifact::Artifact;
use crate::constants::MISSING;
use crate::persistent::PersistentData;

/// Random bytes behind each state token (43 base64url characters).
const STATE_BYTES: usize = 32;

/// Return the persisted `state` token, generating and persisting one if
/// there is none yet.
pub fn establish_state<P: PersistentData>(store: &mut P) -> Result<String, P::Error> {
    if let Some(existing) = persisted_state(store)? {
        return Ok(existing);
    }

    let state = generate_state();
    store.set_persistent_data(Artifact::State.as_str(), Value::String(state.clone()))?;
    debug!("established new csrf state");
    Ok(state)
}

/// Check the `state` returned by the provider against the persisted one.
///
/// On a match the persisted token is cleared so it cannot be replayed, and
/// `true` is returned. On a mismatch, or when nothing is persisted, the
/// token stays and `false` is returned.
pub fn consume_state<P: PersistentData>(store: &mut P, returned: &str) -> Result<bool, P::Error> {
    match persisted_state(store)? {
        Some(expected) if expected == returned => {
            store.clear_persistent_data(Artifact::State.as_str())?;
            debug!("csrf state matched and cleared");
            Ok(true)
        }
        Some(_) => {
            warn!("csrf state token does not match the one provided");
            Ok(false)
        }
        None => {
            warn!("csrf state returned but none was persisted");
            Ok(false)
        }
    }
}

fn persisted_state<P: PersistentData>(store: &P) -> Result<Option<String>, P::Error> {
    match store.get_persistent_data(Artifact::State.as_str(), MISSING)? {
        Value::String(s) if !s.is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn generate_state() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_id::FixedAppId;
    use crate::store::ArtifactStore;
    use serde_json::json;
    use session::{MemorySession, Session};

    #[test]
    fn test_generated_state_is_url_safe_base64() {
        let state = generate_state();
        assert_eq!(state.len(), 43);
        assert!(
            state
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "state must be URL-safe base64 (no padding): {state}"
        );
        assert_ne!(state, generate_state(), "two states must not collide");
    }

    #[test]
    fn test_establish_persists_and_reuses_state() {
        let mut session = MemorySession::new();
        let mut store = ArtifactStore::new(&mut session, FixedAppId::new("123")).unwrap();
        let first = establish_state(&mut store).unwrap();
        let second = establish_state(&mut store).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.get_or_missing("state").unwrap(), json!(first));
    }

    #[test]
    fn test_establish_replaces_non_string_state() {
        let mut session = MemorySession::new();
        let mut store = ArtifactStore::new(&mut session, FixedAppId::new("123")).unwrap();
        store.set("state", json!(false)).unwrap();
        let state = establish_state(&mut store).unwrap();
        assert_eq!(state.len(), 43);
    }

    #[test]
    fn test_matching_state_is_consumed_once() {
        let mut session = MemorySession::new();
        let mut store = ArtifactStore::new(&mut session, FixedAppId::new("123")).unwrap();
        let state = establish_state(&mut store).unwrap();

        assert!(consume_state(&mut store, &state).unwrap());
        assert_eq!(store.get_or_missing("state").unwrap(), MISSING);
        assert!(!consume_state(&mut store, &state).unwrap(), "replay must fail");
    }

    #[test]
    fn test_mismatched_state_is_kept() {
        let mut session = MemorySession::new();
        let mut store = ArtifactStore::new(&mut session, FixedAppId::new("123")).unwrap();
        let state = establish_state(&mut store).unwrap();

        assert!(!consume_state(&mut store, "forged").unwrap());
        assert_eq!(store.get_or_missing("state").unwrap(), json!(state));
    }

    #[test]
    fn test_state_is_written_under_namespaced_key() {
        let mut session = MemorySession::new();
        let state = {
            let mut store = ArtifactStore::new(&mut session, FixedAppId::new("123")).unwrap();
            establish_state(&mut store).unwrap()
        };
        assert_eq!(
            session.get("_fos_facebook_fb_123_state").unwrap(),
            Some(json!(state))
        );
    }
}
