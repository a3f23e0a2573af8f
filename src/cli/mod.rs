//! CLI module
//!
//! Command-line interface over the API client.
//!
//! # Commands
//!
//! - `phone-numbers list|get` - Phone numbers on the account
//! - `sim-cards list|get` - SIM cards on the account
//! - `messages send|get` - Send and look up messages
//!
//! Every command prints one JSON object per line on stdout.

mod commands;
mod runner;

pub use commands::{Cli, Commands, ListArgs, MessageCommand, ResourceCommand};
pub use runner::Runner;
