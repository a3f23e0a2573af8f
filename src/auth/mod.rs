//! Authentication module
//!
//! The platform authenticates with a bearer API key.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
