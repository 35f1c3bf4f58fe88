//! Auth-domain primitives: PKCE material and redacted token secrets.

pub mod pkce;
pub mod secret;

pub use pkce::*;
pub use secret::*;
