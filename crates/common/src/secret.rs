//! Redacting wrapper for credential-bearing values
//!
//! Access tokens and authorization codes pass through diagnostics and the
//! inspection tool. Wrapping them in `Secret` keeps them out of `Debug` and
//! `Display` output and wipes the buffer on drop.

use std::fmt;
use zeroize::Zeroize;

const REDACTED: &str = "[REDACTED]";

/// Sensitive value, rendered as `[REDACTED]` in Debug/Display
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value. Callers decide whether it may be shown.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T: Zeroize> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_is_redacted_in_debug_and_display() {
        let token = Secret::new(String::from("EAAB-access-token"));
        assert_eq!(format!("{token:?}"), "[REDACTED]");
        assert_eq!(token.to_string(), "[REDACTED]");
    }

    #[test]
    fn test_expose_returns_inner_value() {
        let code: Secret<String> = String::from("auth-code-42").into();
        assert_eq!(code.expose(), "auth-code-42");
    }

    #[test]
    fn test_clone_keeps_value() {
        let token = Secret::new(String::from("tkn"));
        let copy = token.clone();
        drop(token);
        assert_eq!(copy.expose(), "tkn");
    }
}
