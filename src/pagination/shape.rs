//! Response shapes for paginated list bodies
//!
//! Every list endpoint returns its items under `data` (or as a bare array).
//! Where the pagination metadata lives depends on the endpoint:
//!
//! - structured: `{"data": [...], "meta": {"page_number": 1, ...}}`
//! - flat: `{"data": [...], "page_number": 1, ...}` or just `[...]`
//!
//! Both implement [`PageShape`]; they differ only in [`PageShape::meta`].

use super::page::{Page, PageMeta, PageRequest};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Field holding the items array
pub const DATA_FIELD: &str = "data";

/// Field holding structured pagination metadata
pub const META_FIELD: &str = "meta";

/// Decodes a list response body into a [`Page`]
pub trait PageShape: Send + Sync + std::fmt::Debug {
    /// Read pagination metadata from a response body
    ///
    /// Missing page number or size fall back to the request's values;
    /// missing totals stay `None`.
    fn meta(&self, body: &Value, request: &PageRequest) -> PageMeta;

    /// Whether an object body without a `data` key is malformed
    ///
    /// An explicit `"data": null` always decodes as an empty page.
    fn requires_data(&self) -> bool {
        false
    }

    /// Decode a full response body
    fn decode<T: DeserializeOwned>(&self, mut body: Value, request: &PageRequest) -> Result<Page<T>>
    where
        Self: Sized,
    {
        let meta = self.meta(&body, request);
        let items = take_items(&mut body, self.requires_data())?;
        let items: Vec<T> = serde_json::from_value(items)
            .map_err(|e| Error::decode(format!("invalid list item: {e}")))?;
        Ok(Page::new(items, meta))
    }
}

/// Metadata in a sibling `meta` object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuredPagination;

impl PageShape for StructuredPagination {
    fn meta(&self, body: &Value, request: &PageRequest) -> PageMeta {
        match body.get(META_FIELD) {
            Some(meta) => read_meta(meta, request),
            None => PageMeta::from_request(request),
        }
    }

    fn requires_data(&self) -> bool {
        true
    }
}

/// Metadata inlined next to `data`, or absent entirely
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatPagination;

impl PageShape for FlatPagination {
    fn meta(&self, body: &Value, request: &PageRequest) -> PageMeta {
        if body.is_object() {
            read_meta(body, request)
        } else {
            PageMeta::from_request(request)
        }
    }
}

/// Pull the items array out of a body, leaving `Null` behind
fn take_items(body: &mut Value, required: bool) -> Result<Value> {
    if body.is_array() {
        return Ok(body.take());
    }
    let Some(map) = body.as_object_mut() else {
        return Err(Error::decode(format!(
            "expected a list response, got {}",
            kind(body)
        )));
    };
    match map.get_mut(DATA_FIELD).map(Value::take) {
        Some(items @ Value::Array(_)) => Ok(items),
        Some(Value::Null) => Ok(Value::Array(Vec::new())),
        None if required => Err(Error::decode(format!(
            "list response has no '{DATA_FIELD}' field"
        ))),
        None => Ok(Value::Array(Vec::new())),
        Some(other) => Err(Error::decode(format!(
            "expected '{DATA_FIELD}' to be an array, got {}",
            kind(&other)
        ))),
    }
}

fn read_meta(source: &Value, request: &PageRequest) -> PageMeta {
    PageMeta {
        page_number: read_u64(source, "page_number")
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(request.page_number()),
        page_size: read_u64(source, "page_size")
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(request.page_size()),
        total_pages: read_u64(source, "total_pages").and_then(|n| u32::try_from(n).ok()),
        total_results: read_u64(source, "total_results"),
        has_more: source.get("has_more").and_then(Value::as_bool),
    }
}

// Some endpoints send counters as strings.
fn read_u64(source: &Value, field: &str) -> Option<u64> {
    match source.get(field)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
