//! Session dump files
//!
//! A dump is one session's entries as a JSON object of name to value. Loads
//! of a missing file yield an empty session. Saves go through a temp file
//! and rename so an interrupted write never leaves a truncated dump, and the
//! file is made owner-only since it holds access tokens.

use std::io::Write;
use std::path::Path;

use session::MemorySession;
use tracing::{debug, info};

/// Read a dump into an (unstarted) in-memory session.
pub fn load(path: &Path) -> common::Result<MemorySession> {
    if !path.exists() {
        info!(path = %path.display(), "session dump not found, starting with empty session");
        return Ok(MemorySession::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    let session = MemorySession::from_json(value)
        .map_err(|e| common::Error::Dump(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), entries = session.len(), "loaded session dump");
    Ok(session)
}

/// Write the session's entries back to `path` atomically.
///
/// The temp file is created owner-only in the target's directory and is
/// removed again if any step before the final rename fails.
pub fn save(path: &Path, session: &MemorySession) -> common::Result<()> {
    let json = serde_json::to_string_pretty(&session.to_json())?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".session-dump.tmp.")
        .tempfile_in(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;

    // On failure the returned handle is dropped here, deleting the temp file
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), entries = session.len(), "saved session dump");
    Ok(())
}
