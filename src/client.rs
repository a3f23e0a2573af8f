//! Top-level API client

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::resources::{ApiCore, Messages, PhoneNumbers, SimCards};
use tracing::debug;

/// Entry point to the API
///
/// Owns the transport; resource handles borrow it.
#[derive(Debug)]
pub struct TelcoClient {
    http: HttpClient,
}

impl TelcoClient {
    /// Build a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_config(), config.auth_config())?;
        debug!(base_url = %config.base_url, "Created API client");
        Ok(Self { http })
    }

    /// Build a client from `TELCO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Wrap an already configured transport
    pub fn with_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// The underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn core(&self) -> ApiCore<'_> {
        ApiCore::new(&self.http)
    }

    /// `/phone_numbers`
    pub fn phone_numbers(&self) -> PhoneNumbers<'_> {
        PhoneNumbers::new(self.core())
    }

    /// `/messages`
    pub fn messages(&self) -> Messages<'_> {
        Messages::new(self.core())
    }

    /// `/sim_cards`
    pub fn sim_cards(&self) -> SimCards<'_> {
        SimCards::new(self.core())
    }
}
