//! Outbound and inbound SMS/MMS messages

use super::api::{item_path, unwrap_data, ApiCore, DataEnvelope};
use crate::error::{Error, Result};
use crate::http::RawResponse;
use crate::types::{Method, Params};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PATH: &str = "messages";

/// One side of a message exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageParty {
    pub phone_number: String,
    #[serde(default)]
    pub carrier: Option<String>,
    /// Delivery status (recipients only)
    #[serde(default)]
    pub status: Option<String>,
}

/// A message as tracked by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// `outbound` or `inbound`
    #[serde(default)]
    pub direction: Option<String>,
    pub from: MessageParty,
    #[serde(default)]
    pub to: Vec<MessageParty>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub media: Vec<serde_json::Value>,
    /// Number of billed segments
    #[serde(default)]
    pub parts: Option<u32>,
    #[serde(default)]
    pub messaging_profile_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a send-message call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendMessageParams {
    /// Sending number, alphanumeric sender id, or short code
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl SendMessageParams {
    fn validate(&self) -> Result<()> {
        if self.from.is_empty() || self.to.is_empty() {
            return Err(Error::invalid_params("'from' and 'to' are required"));
        }
        if self.text.as_deref().map_or(true, str::is_empty) && self.media_urls.is_empty() {
            return Err(Error::invalid_params(
                "a message needs 'text' or at least one media URL",
            ));
        }
        Ok(())
    }
}

/// `/messages` endpoints
#[derive(Debug, Clone, Copy)]
pub struct Messages<'c> {
    core: ApiCore<'c>,
}

impl<'c> Messages<'c> {
    pub(crate) fn new(core: ApiCore<'c>) -> Self {
        Self { core }
    }

    /// Send a text message
    pub async fn send(&self, from: &str, to: &str, text: &str) -> Result<Message> {
        let params = SendMessageParams {
            from: from.to_string(),
            to: to.to_string(),
            text: Some(text.to_string()),
            ..SendMessageParams::default()
        };
        unwrap_data(&self.send_raw(params).await?)
    }

    /// Send a message, raw
    ///
    /// Accepts the typed parameters or a plain map of the same fields.
    pub async fn send_raw(
        &self,
        params: impl Into<Params<SendMessageParams>>,
    ) -> Result<RawResponse<DataEnvelope<Message>>> {
        let params = params.into().normalize()?;
        params.validate()?;
        self.core.send_json_raw(Method::POST, PATH, &params).await
    }

    /// Look up one message by id
    pub async fn retrieve(&self, id: &str) -> Result<Message> {
        unwrap_data(&self.retrieve_raw(id).await?)
    }

    /// Look up one message by id, raw
    pub async fn retrieve_raw(&self, id: &str) -> Result<RawResponse<DataEnvelope<Message>>> {
        self.core.get_raw(&item_path(PATH, id)?).await
    }
}
