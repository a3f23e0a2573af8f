//! Wireless SIM cards

use super::api::{item_path, unwrap_data, ApiCore, DataEnvelope, ListEndpoint, RawListResponse};
use crate::error::Result;
use crate::http::RawResponse;
use crate::pagination::{FlatPagination, PageRequest, Paginator, DEFAULT_PAGE_SIZE};
use crate::types::Params;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PATH: &str = "sim_cards";

/// A SIM card registered to the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimCard {
    pub id: String,
    pub iccid: String,
    #[serde(default)]
    pub imsi: Option<String>,
    #[serde(default)]
    pub msisdn: Option<String>,
    #[serde(default)]
    pub status: Option<SimCardStatus>,
    #[serde(default)]
    pub sim_card_group_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Current and pending state of a SIM card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimCardStatus {
    /// e.g. `enabled`, `disabled`, `standby`
    pub value: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Filters for listing SIM cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSimCardsParams {
    #[serde(default, rename = "page[number]")]
    pub page_number: Option<u32>,
    #[serde(default, rename = "page[size]")]
    pub page_size: Option<u32>,
    #[serde(default, rename = "filter[iccid]")]
    pub iccid: Option<String>,
    #[serde(default, rename = "filter[status]")]
    pub status: Option<String>,
    #[serde(default, rename = "filter[sim_card_group_id]")]
    pub sim_card_group_id: Option<String>,
    /// Comma separated tags, all must match
    #[serde(default, rename = "filter[tags]")]
    pub tags: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListSimCardsParams {
    /// Page request carrying these filters
    pub fn to_request(&self) -> PageRequest {
        let filters = [
            ("filter[iccid]", &self.iccid),
            ("filter[status]", &self.status),
            ("filter[sim_card_group_id]", &self.sim_card_group_id),
            ("filter[tags]", &self.tags),
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

/// Paginator returned by [`SimCards::list`]
pub type SimCardPaginator<'c> = Paginator<SimCard, ListEndpoint<'c, SimCard, FlatPagination>>;

/// `/sim_cards` endpoints
///
/// This listing reports its paging counters inline (or not at all), so it
/// uses [`FlatPagination`].
#[derive(Debug, Clone, Copy)]
pub struct SimCards<'c> {
    core: ApiCore<'c>,
}

impl<'c> SimCards<'c> {
    pub(crate) fn new(core: ApiCore<'c>) -> Self {
        Self { core }
    }

    /// Walk all SIM cards matching `params`
    pub fn list(&self, params: ListSimCardsParams) -> SimCardPaginator<'c> {
        self.core.list(PATH, params.to_request(), FlatPagination)
    }

    /// Fetch the single page described by `params`
    pub async fn list_raw(
        &self,
        params: impl Into<Params<ListSimCardsParams>>,
    ) -> Result<RawListResponse<SimCard, FlatPagination>> {
        let params = params.into().normalize()?;
        self.core
            .list_raw(PATH, params.to_request(), FlatPagination)
            .await
    }

    /// Look up one SIM card by id
    pub async fn retrieve(&self, id: &str) -> Result<SimCard> {
        unwrap_data(&self.retrieve_raw(id).await?)
    }

    /// Look up one SIM card by id, raw
    pub async fn retrieve_raw(&self, id: &str) -> Result<RawResponse<DataEnvelope<SimCard>>> {
        self.core.get_raw(&item_path(PATH, id)?).await
    }
}
