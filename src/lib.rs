// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Telco SDK
//!
//! Async Rust client for a telephony REST API: phone numbers, SIM cards and
//! messaging, with page-by-page or item-by-item traversal of list endpoints.
//!
//! ## Features
//!
//! - **Uniform Pagination**: One [`Paginator`] for every list endpoint,
//!   whether page metadata sits in a `meta` object or inline
//! - **Friendly and Raw Interfaces**: Decoded domain objects, or the full
//!   HTTP response with status and headers
//! - **Resilient Transport**: Retries with backoff, client-side rate limiting
//! - **Configuration**: In code, from `TELCO_*` environment variables, or YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use telco_sdk::{ClientConfig, Result, TelcoClient};
//! use telco_sdk::resources::ListPhoneNumbersParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = TelcoClient::new(&ClientConfig::from_env()?)?;
//!
//!     let mut numbers = client.phone_numbers().list(ListPhoneNumbersParams {
//!         page_size: Some(50),
//!         status: Some("active".into()),
//!         ..Default::default()
//!     });
//!
//!     let mut items = Box::pin(numbers.items());
//!     while let Some(number) = items.next().await {
//!         println!("{}", number?.phone_number);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TelcoClient → PhoneNumbers · SimCards · Messages            │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ friendly / raw
//! ┌──────────────────┬───────────┴──────────┬────────────────────┐
//! │    Pagination    │       ApiCore        │       Config       │
//! ├──────────────────┼──────────────────────┼────────────────────┤
//! │ Paginator        │ RawResponse          │ ClientConfig       │
//! │ PageFetcher      │ DataEnvelope         │ env / YAML         │
//! │ PageShape        │ ListEndpoint         │                    │
//! └──────────────────┴───────────┬──────────┴────────────────────┘
//!                                │
//!            HttpClient: auth · retry · backoff · rate limit
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page traversal over list endpoints
pub mod pagination;

/// Resource interfaces (phone numbers, SIM cards, messages)
pub mod resources;

/// Client configuration
pub mod config;

/// Top-level client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::TelcoClient;
pub use config::ClientConfig;
pub use pagination::{Page, PageFetcher, PageMeta, PageRequest, PageShape, Paginator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
