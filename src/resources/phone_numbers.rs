//! Phone numbers owned by the account

use super::api::{item_path, unwrap_data, ApiCore, DataEnvelope, ListEndpoint, RawListResponse};
use crate::error::Result;
use crate::http::RawResponse;
use crate::pagination::{PageRequest, Paginator, StructuredPagination, DEFAULT_PAGE_SIZE};
use crate::types::Params;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PATH: &str = "phone_numbers";

/// A phone number on the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub id: String,
    /// E.164 formatted number
    pub phone_number: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub connection_id: Option<String>,
    #[serde(default)]
    pub messaging_profile_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for listing phone numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPhoneNumbersParams {
    #[serde(default, rename = "page[number]")]
    pub page_number: Option<u32>,
    #[serde(default, rename = "page[size]")]
    pub page_size: Option<u32>,
    #[serde(default, rename = "filter[status]")]
    pub status: Option<String>,
    #[serde(default, rename = "filter[tag]")]
    pub tag: Option<String>,
    /// Partial match on the number itself
    #[serde(default, rename = "filter[phone_number]")]
    pub phone_number: Option<String>,
    #[serde(default, rename = "filter[connection_id]")]
    pub connection_id: Option<String>,
    /// e.g. `-created_at`
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListPhoneNumbersParams {
    /// Page request carrying these filters
    pub fn to_request(&self) -> PageRequest {
        let filters = [
            ("filter[status]", &self.status),
            ("filter[tag]", &self.tag),
            ("filter[phone_number]", &self.phone_number),
            ("filter[connection_id]", &self.connection_id),
            ("sort", &self.sort),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)));

        PageRequest::starting_at(
            self.page_number.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .with_filters(filters)
    }
}

/// Paginator returned by [`PhoneNumbers::list`]
pub type PhoneNumberPaginator<'c> =
    Paginator<PhoneNumber, ListEndpoint<'c, PhoneNumber, StructuredPagination>>;

/// `/phone_numbers` endpoints
#[derive(Debug, Clone, Copy)]
pub struct PhoneNumbers<'c> {
    core: ApiCore<'c>,
}

impl<'c> PhoneNumbers<'c> {
    pub(crate) fn new(core: ApiCore<'c>) -> Self {
        Self { core }
    }

    /// Walk all phone numbers matching `params`
    pub fn list(&self, params: ListPhoneNumbersParams) -> PhoneNumberPaginator<'c> {
        self.core
            .list(PATH, params.to_request(), StructuredPagination)
    }

    /// Fetch the single page described by `params`
    pub async fn list_raw(
        &self,
        params: impl Into<Params<ListPhoneNumbersParams>>,
    ) -> Result<RawListResponse<PhoneNumber, StructuredPagination>> {
        let params = params.into().normalize()?;
        self.core
            .list_raw(PATH, params.to_request(), StructuredPagination)
            .await
    }

    /// Look up one phone number by id
    pub async fn retrieve(&self, id: &str) -> Result<PhoneNumber> {
        unwrap_data(&self.retrieve_raw(id).await?)
    }

    /// Look up one phone number by id, raw
    pub async fn retrieve_raw(&self, id: &str) -> Result<RawResponse<DataEnvelope<PhoneNumber>>> {
        self.core.get_raw(&item_path(PATH, id)?).await
    }
}
