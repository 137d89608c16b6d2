//! The allow-list of persistable artifacts

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One of the four values a login flow may persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// CSRF token sent with the authorization request
    State,
    /// Authorization code returned by the provider
    Code,
    AccessToken,
    UserId,
}

impl Artifact {
    /// Every allowed artifact, in the order the login flow produces them.
    pub const ALL: [Artifact; 4] = [
        Artifact::State,
        Artifact::Code,
        Artifact::AccessToken,
        Artifact::UserId,
    ];

    /// Name used by the host client and in session keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Artifact::State => "state",
            Artifact::Code => "code",
            Artifact::AccessToken => "access_token",
            Artifact::UserId => "user_id",
        }
    }

    /// Look up an artifact by name. Exact, case-sensitive match.
    pub fn parse(name: &str) -> Option<Artifact> {
        Artifact::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// Whether the value is a credential and must be redacted in output.
    pub fn is_sensitive(self) -> bool {
        matches!(self, Artifact::Code | Artifact::AccessToken)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Artifact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Artifact::parse(s).ok_or_else(|| Error::UnknownArtifact(s.to_owned()))
    }
}
