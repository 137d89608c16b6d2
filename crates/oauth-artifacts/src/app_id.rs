//! Application identifier accessor
//!
//! The host client owns the application id and may switch configuration
//! between calls, so the store asks for it every time it builds a key.

/// Supplies the current OAuth application id.
pub trait AppIdSource {
    fn app_id(&self) -> String;
}

/// Any `Fn() -> String` works as an accessor, e.g. `|| client.app_id().to_owned()`.
impl<F> AppIdSource for F
where
    F: Fn() -> String,
{
    fn app_id(&self) -> String {
        self()
    }
}

/// Application id fixed at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAppId(String);

impl FixedAppId {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self(app_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AppIdSource for FixedAppId {
    fn app_id(&self) -> String {
        self.0.clone()
    }
}
