//! CLI commands and argument parsing

use crate::config::{ENV_API_KEY, ENV_BASE_URL};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the telephony API
#[derive(Parser, Debug)]
#[command(name = "telco")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API key (bearer token)
    #[arg(long, global = true, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// API root URL
    #[arg(long, global = true, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Phone numbers on the account
    PhoneNumbers {
        #[command(subcommand)]
        action: ResourceCommand,
    },

    /// SIM cards on the account
    SimCards {
        #[command(subcommand)]
        action: ResourceCommand,
    },

    /// Send and look up messages
    Messages {
        #[command(subcommand)]
        action: MessageCommand,
    },
}

/// Operations shared by listable resources
#[derive(Subcommand, Debug)]
pub enum ResourceCommand {
    /// List records, one JSON object per line
    List(ListArgs),

    /// Show a single record
    Get {
        /// Record id
        id: String,
    },
}

/// Paging and filter options for `list`
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Records per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// First page to fetch
    #[arg(long)]
    pub page: Option<u32>,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Filter as key=value, e.g. `status=active` (repeatable)
    #[arg(long = "filter", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,
}

/// Message operations
#[derive(Subcommand, Debug)]
pub enum MessageCommand {
    /// Send a message
    Send {
        /// Sending number or sender id
        #[arg(long)]
        from: String,

        /// Recipient number
        #[arg(long)]
        to: String,

        /// Message body
        #[arg(long)]
        text: Option<String>,

        /// Media URL for MMS (repeatable)
        #[arg(long = "media")]
        media_urls: Vec<String>,
    },

    /// Show a single message
    Get {
        /// Message id
        id: String,
    },
}

/// Parse `key=value`
pub(crate) fn parse_key_val(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty filter name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
