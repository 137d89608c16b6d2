//! Human-readable artifact report

use common::Secret;
use oauth_artifacts::{AppIdSource, Artifact, ArtifactStore, MISSING};
use session::Session;

/// One line per allowed artifact: `<session key> = <value>`.
///
/// Absent artifacts (or ones holding the host's `false` marker) print as
/// `<absent>`. Credentials are redacted unless `reveal` is set.
pub fn render<S, A>(store: &ArtifactStore<'_, S, A>, reveal: bool) -> Result<Vec<String>, S::Error>
where
    S: Session + ?Sized,
    A: AppIdSource,
{
    let mut lines = Vec::with_capacity(Artifact::ALL.len());
    for artifact in Artifact::ALL {
        let value = store.get_or_missing(artifact.as_str())?;
        let shown = if value == MISSING {
            String::from("<absent>")
        } else if artifact.is_sensitive() && !reveal {
            Secret::new(value.to_string()).to_string()
        } else {
            value.to_string()
        };
        lines.push(format!("{} = {shown}", store.session_key(artifact)));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oauth_artifacts::FixedAppId;
    use session::MemorySession;

    #[test]
    fn test_credentials_are_redacted_by_default() {
        let mut session = MemorySession::new();
        let mut store = ArtifactStore::new(&mut session, FixedAppId::new("123")).unwrap();
        store.set("access_token", "TKN").unwrap();
        store.set("user_id", "1001").unwrap();

        let lines = render(&store, false).unwrap();
        assert_eq!(
            lines,
            vec![
                "_fos_facebook_fb_123_state = <absent>",
                "_fos_facebook_fb_123_code = <absent>",
                "_fos_facebook_fb_123_access_token = [REDACTED]",
                "_fos_facebook_fb_123_user_id = \"1001\"",
            ]
        );
    }

    #[test]
    fn test_reveal_prints_credentials() {
        let mut session = MemorySession::new();
        let mut store = ArtifactStore::new(&mut session, FixedAppId::new("123")).unwrap();
        store.set("code", "C0DE").unwrap();

        let lines = render(&store, true).unwrap();
        assert_eq!(lines[1], "_fos_facebook_fb_123_code = \"C0DE\"");
    }
}
