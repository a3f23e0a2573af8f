//! Page and page-request types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameter carrying the 1-based page number
pub const PAGE_NUMBER_PARAM: &str = "page[number]";

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// Page size used when a list call does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Identifies one page of a listing
///
/// Filter and sort parameters are fixed when the request is built and are
/// carried unchanged into every following page by [`PageRequest::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
    filters: BTreeMap<String, String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    /// Request for the first page with the given size (minimum 1)
    pub fn new(page_size: u32) -> Self {
        Self::starting_at(1, page_size)
    }

    /// Request for an arbitrary page (page numbers are 1-based)
    pub fn starting_at(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.max(1),
            filters: BTreeMap::new(),
        }
    }

    /// Add a filter or sort parameter
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Add several filter or sort parameters
    #[must_use]
    pub fn with_filters<K, V>(mut self, filters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.filters
            .extend(filters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// 1-based page number
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Requested number of items per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Filter and sort parameters
    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Request for the following page, filters unchanged
    ///
    /// `None` when the page number cannot be advanced any further.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        Some(Self {
            page_number: self.page_number.checked_add(1)?,
            page_size: self.page_size,
            filters: self.filters.clone(),
        })
    }

    /// All query parameters for this request, paging included
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 2);
        params.push((PAGE_NUMBER_PARAM.to_string(), self.page_number.to_string()));
        params.push((PAGE_SIZE_PARAM.to_string(), self.page_size.to_string()));
        params.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        params
    }
}

/// Pagination metadata reported alongside a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageMeta {
    /// 1-based page number
    pub page_number: u32,
    /// Page size the server applied
    pub page_size: u32,
    /// Total number of pages, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Total number of results, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    /// Explicit "more pages follow" flag, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl PageMeta {
    /// Metadata with no totals, echoing the request
    pub fn from_request(request: &PageRequest) -> Self {
        Self {
            page_number: request.page_number(),
            page_size: request.page_size(),
            ..Self::default()
        }
    }

    /// Check if the server reported an end-of-data signal
    pub fn has_explicit_end(&self) -> bool {
        self.has_more.is_some() || self.total_pages.is_some() || self.total_results.is_some()
    }
}

/// One fetched page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Position of this page within the full result set
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if no page follows this one
    ///
    /// An empty page always ends the listing. Otherwise an explicit
    /// `has_more`, then `total_pages`, then `total_results` decides. Without
    /// any of them, a page shorter than the requested size is the last one;
    /// a full page may be followed by more.
    pub fn is_last(&self, request: &PageRequest) -> bool {
        if self.items.is_empty() {
            return true;
        }
        if let Some(has_more) = self.meta.has_more {
            return !has_more;
        }
        if let Some(total_pages) = self.meta.total_pages {
            return self.meta.page_number >= total_pages;
        }
        if let Some(total_results) = self.meta.total_results {
            let seen = u64::from(self.meta.page_number) * u64::from(self.meta.page_size);
            return seen >= total_results;
        }
        self.items.len() < request.page_size() as usize
    }
}
