//! Session-backed artifact store
//!
//! `ArtifactStore` borrows the request's session for its whole lifetime and
//! namespaces every key by prefix and application id. Keys outside the
//! allow-list never reach the session: `set` and `clear` become no-ops and
//! `get` returns the caller's default, each with a warning. Session errors
//! pass through untouched.
//!
//! `clear_all` is wider than the other operations. It matches on the prefix
//! alone, so it also removes artifacts written for other application ids
//! under the same prefix.

use serde_json::Value;
use session::Session;
use tracing::{debug, info, warn};

use crate::app_id::AppIdSource;
use crate::artifact::Artifact;
use crate::constants::{DEFAULT_PREFIX, KEY_NAMESPACE, KEY_SEPARATOR, MISSING};
use crate::error::{Error, Operation};
use crate::persistent::PersistentData;

/// Session key for `artifact` under `prefix` and `app_id`.
///
/// `<prefix>fb_<app_id>_<artifact>`. Tools reading raw session data rely on
/// this layout.
pub fn session_key(prefix: &str, app_id: &str, artifact: Artifact) -> String {
    format!(
        "{prefix}{KEY_NAMESPACE}{KEY_SEPARATOR}{app_id}{KEY_SEPARATOR}{}",
        artifact.as_str()
    )
}

pub struct ArtifactStore<'s, S, A>
where
    S: Session + ?Sized,
    A: AppIdSource,
{
    session: &'s mut S,
    app_id: A,
    prefix: String,
}

impl<'s, S, A> ArtifactStore<'s, S, A>
where
    S: Session + ?Sized,
    A: AppIdSource,
{
    /// Open a store with the default prefix, starting the session if needed.
    pub fn new(session: &'s mut S, app_id: A) -> Result<Self, S::Error> {
        Self::with_prefix(session, app_id, DEFAULT_PREFIX)
    }

    /// Open a store with a custom prefix, starting the session if needed.
    ///
    /// An empty prefix is accepted, but then `clear_all` empties the whole
    /// session.
    pub fn with_prefix(
        session: &'s mut S,
        app_id: A,
        prefix: impl Into<String>,
    ) -> Result<Self, S::Error> {
        session.start()?;
        Ok(Self {
            session,
            app_id,
            prefix: prefix.into(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Current application id, as reported by the accessor right now.
    pub fn app_id(&self) -> String {
        self.app_id.app_id()
    }

    /// Session key this store uses for `artifact` under the current app id.
    pub fn session_key(&self, artifact: Artifact) -> String {
        session_key(&self.prefix, &self.app_id.app_id(), artifact)
    }

    /// Persist `value` for `key`, replacing any earlier value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), S::Error> {
        let Some(artifact) = allowed(key, Operation::Set) else {
            return Ok(());
        };
        let name = self.session_key(artifact);
        self.session.set(&name, value.into())?;
        debug!(key = %name, "persisted artifact");
        Ok(())
    }

    /// Value persisted for `key`, or `default` if none is stored or the key
    /// is not an allowed artifact.
    pub fn get(&self, key: &str, default: Value) -> Result<Value, S::Error> {
        let Some(artifact) = allowed(key, Operation::Get) else {
            return Ok(default);
        };
        let name = self.session_key(artifact);
        if !self.session.has(&name)? {
            return Ok(default);
        }
        Ok(self.session.get(&name)?.unwrap_or(default))
    }

    /// `get` with the host's `false` default.
    pub fn get_or_missing(&self, key: &str) -> Result<Value, S::Error> {
        self.get(key, MISSING)
    }

    /// Remove the value persisted for `key` under the current app id.
    pub fn clear(&mut self, key: &str) -> Result<(), S::Error> {
        let Some(artifact) = allowed(key, Operation::Clear) else {
            return Ok(());
        };
        let name = self.session_key(artifact);
        if self.session.remove(&name)?.is_some() {
            debug!(key = %name, "cleared artifact");
            metrics::counter!("oauth_artifact_cleared_total", "scope" => "single").increment(1);
        }
        Ok(())
    }

    /// Remove every session entry whose name starts with the prefix.
    ///
    /// The application id plays no part here: artifacts of every app sharing
    /// the prefix go, as does any other prefixed entry. Returns the number of
    /// entries removed.
    pub fn clear_all(&mut self) -> Result<usize, S::Error> {
        let doomed: Vec<String> = self
            .session
            .keys()?
            .into_iter()
            .filter(|name| name.starts_with(self.prefix.as_str()))
            .collect();

        for name in &doomed {
            self.session.remove(name)?;
        }

        metrics::counter!("oauth_artifact_cleared_total", "scope" => "prefix")
            .increment(doomed.len() as u64);
        info!(prefix = %self.prefix, removed = doomed.len(), "cleared persisted artifacts");
        Ok(doomed.len())
    }
}

impl<S, A> PersistentData for ArtifactStore<'_, S, A>
where
    S: Session + ?Sized,
    A: AppIdSource,
{
    type Error = S::Error;

    fn set_persistent_data(&mut self, key: &str, value: Value) -> Result<(), Self::Error> {
        self.set(key, value)
    }

    fn get_persistent_data(&self, key: &str, default: Value) -> Result<Value, Self::Error> {
        self.get(key, default)
    }

    fn clear_persistent_data(&mut self, key: &str) -> Result<(), Self::Error> {
        self.clear(key)
    }

    fn clear_all_persistent_data(&mut self) -> Result<(), Self::Error> {
        self.clear_all().map(|_| ())
    }
}

/// Resolve `key` against the allow-list, logging a rejection.
fn allowed(key: &str, operation: Operation) -> Option<Artifact> {
    let artifact = Artifact::parse(key);
    if artifact.is_none() {
        let err = Error::UnsupportedKey {
            key: key.to_owned(),
            operation,
        };
        warn!(key, operation = operation.as_str(), error = %err, "ignoring unsupported artifact key");
        metrics::counter!("oauth_artifact_rejected_total", "operation" => operation.as_str())
            .increment(1);
    }
    artifact
}
