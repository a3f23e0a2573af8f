//! Common types used throughout the telco SDK
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Generic key-value map with string keys and JSON values
pub type ValueMap = HashMap<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Parameters accepted by the raw resource interfaces
///
/// Callers either hand over the typed parameter struct or a loose key/value
/// map (for fields the typed struct does not know yet). Both are turned into
/// `P` by [`Params::normalize`] before a request is built.
#[derive(Debug, Clone)]
pub enum Params<P> {
    /// Strongly-typed parameters
    Typed(P),
    /// Untyped key/value bag, deserialized into `P` on use
    Map(ValueMap),
}

impl<P: DeserializeOwned> Params<P> {
    /// Convert into the typed form
    pub fn normalize(self) -> Result<P> {
        match self {
            Params::Typed(params) => Ok(params),
            Params::Map(map) => {
                let object: JsonObject = map.into_iter().collect();
                serde_json::from_value(JsonValue::Object(object))
                    .map_err(|e| Error::invalid_params(e.to_string()))
            }
        }
    }
}

impl<P> From<P> for Params<P> {
    fn from(params: P) -> Self {
        Params::Typed(params)
    }
}

impl<P> Params<P> {
    /// Build from an untyped map
    pub fn from_map(map: ValueMap) -> Self {
        Params::Map(map)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Sample {
        to: String,
        #[serde(default)]
        count: Option<u32>,
    }

    #[test]
    fn test_method_conversion() {
        let get: reqwest::Method = Method::GET.into();
        assert_eq!(reqwest::Method::GET, get);
        let patch: reqwest::Method = Method::PATCH.into();
        assert_eq!(reqwest::Method::PATCH, patch);
    }

    #[test]
    fn test_method_default() {
        assert_eq!(Method::default(), Method::GET);
    }

    #[test]
    fn test_backoff_type_serde() {
        let backoff: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(backoff, BackoffType::Linear);
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }

    #[test]
    fn test_params_typed_passthrough() {
        let params: Params<Sample> = Sample {
            to: "+15551234567".to_string(),
            count: None,
        }
        .into();
        let typed = params.normalize().unwrap();
        assert_eq!(typed.to, "+15551234567");
    }

    #[test]
    fn test_params_map_normalizes() {
        let mut map = ValueMap::new();
        map.insert("to".to_string(), json!("+15557654321"));
        map.insert("count".to_string(), json!(3));

        let typed = Params::<Sample>::from_map(map).normalize().unwrap();
        assert_eq!(
            typed,
            Sample {
                to: "+15557654321".to_string(),
                count: Some(3)
            }
        );
    }

    #[test]
    fn test_params_map_rejects_bad_shape() {
        let mut map = ValueMap::new();
        map.insert("count".to_string(), json!("three"));

        let err = Params::<Sample>::from_map(map).normalize().unwrap_err();
        assert!(matches!(err, Error::InvalidParams { .. }));
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
