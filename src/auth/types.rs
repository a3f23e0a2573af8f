//! Auth configuration types

use std::fmt;

/// Credentials sent with every request
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// Anonymous requests (mock servers, local gateways)
    #[default]
    None,

    /// `Authorization: Bearer <api key>`
    Bearer {
        /// The API key
        token: String,
    },
}

impl AuthConfig {
    /// Bearer auth with the platform API key
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Check if any credentials are configured
    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }
}

// Secrets never reach logs through Debug.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
        }
    }
}
