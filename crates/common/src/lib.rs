//! Common types shared by the OAuth artifact crates and tooling

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
