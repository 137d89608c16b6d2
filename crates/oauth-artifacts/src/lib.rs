//! Session-backed persistence for OAuth login artifacts
//!
//! A social-login client keeps four values between requests: the CSRF
//! `state` token, the authorization `code`, the `access_token` and the
//! `user_id`. This crate stores them in the caller's session under a
//! namespaced key instead of the client's own storage:
//!
//! ```text
//! <prefix>fb_<app id>_<artifact>      e.g. _fos_facebook_fb_123_access_token
//! ```
//!
//! Usage within one request:
//! 1. Host builds an `ArtifactStore` over its session; the session is started
//! 2. Host calls `set`/`get`/`clear` (or the `PersistentData` hooks) with
//!    artifact names; names outside the allow-list are logged and ignored
//! 3. On logout the host calls `clear_all`, which drops every key under the
//!    prefix, for every application id sharing it
//!
//! `csrf` builds the `state` round trip on top of the same hooks.

pub mod app_id;
pub mod artifact;
pub mod constants;
pub mod csrf;
pub mod error;
pub mod persistent;
pub mod store;

pub use app_id::{AppIdSource, FixedAppId};
pub use artifact::Artifact;
pub use constants::*;
pub use csrf::{consume_state, establish_state};
pub use error::{Error, Operation};
pub use persistent::PersistentData;
pub use store::{ArtifactStore, session_key};
