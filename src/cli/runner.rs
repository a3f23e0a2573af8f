//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ListArgs, MessageCommand, ResourceCommand};
use crate::client::TelcoClient;
use crate::config::{ClientConfig, ENV_API_KEY, ENV_BASE_URL};
use crate::error::Result;
use crate::pagination::{PageFetcher, Paginator, PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM};
use crate::resources::{
    unwrap_data, ListPhoneNumbersParams, ListSimCardsParams, SendMessageParams,
};
use crate::types::{JsonValue, Params, ValueMap};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = TelcoClient::new(&self.client_config()?)?;

        match &self.cli.command {
            Commands::PhoneNumbers { action } => match action {
                ResourceCommand::List(args) => {
                    let params: ListPhoneNumbersParams = list_params(args)?;
                    let paginator = client.phone_numbers().list(params);
                    self.print_pages(paginator, args.max_pages).await
                }
                ResourceCommand::Get { id } => {
                    self.output_message(&client.phone_numbers().retrieve(id).await?)
                }
            },
            Commands::SimCards { action } => match action {
                ResourceCommand::List(args) => {
                    let params: ListSimCardsParams = list_params(args)?;
                    let paginator = client.sim_cards().list(params);
                    self.print_pages(paginator, args.max_pages).await
                }
                ResourceCommand::Get { id } => {
                    self.output_message(&client.sim_cards().retrieve(id).await?)
                }
            },
            Commands::Messages { action } => match action {
                MessageCommand::Send {
                    from,
                    to,
                    text,
                    media_urls,
                } => {
                    let message = match (text, media_urls.is_empty()) {
                        (Some(text), true) => client.messages().send(from, to, text).await?,
                        _ => {
                            let params = SendMessageParams {
                                from: from.clone(),
                                to: to.clone(),
                                text: text.clone(),
                                media_urls: media_urls.clone(),
                                ..SendMessageParams::default()
                            };
                            unwrap_data(&client.messages().send_raw(params).await?)?
                        }
                    };
                    self.output_message(&message)
                }
                MessageCommand::Get { id } => {
                    self.output_message(&client.messages().retrieve(id).await?)
                }
            },
        }
    }

    /// Resolve client configuration
    ///
    /// A `--config` file wins over the environment; `--api-key` and
    /// `--base-url` (or their environment variables) override either.
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::from_lookup(|key| match key {
                ENV_API_KEY => self.cli.api_key.clone(),
                ENV_BASE_URL => self.cli.base_url.clone(),
                other => std::env::var(other).ok(),
            })?,
        };

        if let Some(api_key) = &self.cli.api_key {
            config.api_key.clone_from(api_key);
        }
        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        config.validate()?;
        Ok(config)
    }

    /// Print every item of a listing, page by page
    async fn print_pages<T, F>(
        &self,
        mut paginator: Paginator<T, F>,
        max_pages: Option<usize>,
    ) -> Result<()>
    where
        T: Serialize + Send + 'static,
        F: PageFetcher<T>,
    {
        let mut pages = 0usize;
        let mut items = 0usize;

        while let Some(page) = paginator.next_page().await? {
            for item in &page.items {
                self.output_message(item)?;
            }
            pages += 1;
            items += page.len();

            if max_pages.is_some_and(|max| pages >= max) {
                break;
            }
        }

        info!(
            pages,
            items,
            exhausted = paginator.is_terminal(),
            "Listing finished"
        );
        Ok(())
    }

    /// Write one JSON object per line
    fn output_message<S: Serialize + ?Sized>(&self, msg: &S) -> Result<()> {
        println!("{}", serde_json::to_string(msg)?);
        Ok(())
    }
}

/// Query parameter name for a `--filter` key
///
/// Bare names become `filter[name]`; `sort` and already bracketed names
/// pass through.
fn filter_key(name: &str) -> String {
    if name == "sort" || name.contains('[') {
        name.to_string()
    } else {
        format!("filter[{name}]")
    }
}

/// Typed list parameters from command-line options
fn list_params<P>(args: &ListArgs) -> Result<P>
where
    P: Serialize + DeserializeOwned,
{
    let mut map = ValueMap::new();
    if let Some(page) = args.page {
        map.insert(PAGE_NUMBER_PARAM.to_string(), json!(page));
    }
    if let Some(size) = args.page_size {
        map.insert(PAGE_SIZE_PARAM.to_string(), json!(size));
    }

    let mut requested = Vec::with_capacity(args.filters.len());
    for (name, value) in &args.filters {
        let key = filter_key(name);
        map.insert(key.clone(), json!(value));
        requested.push(key);
    }

    let params = Params::<P>::from_map(map).normalize()?;

    let known = serde_json::to_value(&params)?;
    for key in requested {
        if known.get(&key).map_or(true, JsonValue::is_null) {
            warn!(filter = %key, "Filter not supported by this listing, ignoring");
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::parse_key_val;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("status", "filter[status]")]
    #[test_case("sort", "sort")]
    #[test_case("filter[tag]", "filter[tag]")]
    fn test_filter_key(name: &str, expected: &str) {
        assert_eq!(filter_key(name), expected);
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("status=active").unwrap(),
            ("status".to_string(), "active".to_string())
        );
        assert_eq!(
            parse_key_val("tag=a=b").unwrap(),
            ("tag".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("status").is_err());
        assert!(parse_key_val("=active").is_err());
    }

    #[test]
    fn test_list_params() {
        let args = ListArgs {
            page_size: Some(50),
            page: Some(2),
            max_pages: None,
            filters: vec![
                ("status".to_string(), "active".to_string()),
                ("sort".to_string(), "-created_at".to_string()),
                ("colour".to_string(), "blue".to_string()),
            ],
        };

        let params: ListPhoneNumbersParams = list_params(&args).unwrap();
        assert_eq!(params.page_number, Some(2));
        assert_eq!(params.page_size, Some(50));
        assert_eq!(params.status.as_deref(), Some("active"));
        assert_eq!(params.sort.as_deref(), Some("-created_at"));

        let request = params.to_request();
        assert_eq!(request.page_number(), 2);
        assert!(!request.filters().contains_key("filter[colour]"));
    }

    #[test]
    fn test_cli_parses_list() {
        let cli = Cli::try_parse_from([
            "telco",
            "--api-key",
            "KEYcli",
            "phone-numbers",
            "list",
            "--page-size",
            "10",
            "--max-pages",
            "3",
            "--filter",
            "tag=east",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("KEYcli"));
        let Commands::PhoneNumbers {
            action: ResourceCommand::List(args),
        } = cli.command
        else {
            panic!("expected phone-numbers list");
        };
        assert_eq!(args.page_size, Some(10));
        assert_eq!(args.max_pages, Some(3));
        assert_eq!(args.filters, vec![("tag".to_string(), "east".to_string())]);
    }

    #[test]
    fn test_cli_parses_send() {
        let cli = Cli::try_parse_from([
            "telco",
            "messages",
            "send",
            "--from",
            "+15550001111",
            "--to",
            "+15550002222",
            "--media",
            "https://cdn.example/a.png",
        ])
        .unwrap();

        let Commands::Messages {
            action: MessageCommand::Send {
                text, media_urls, ..
            },
        } = cli.command
        else {
            panic!("expected messages send");
        };
        assert_eq!(text, None);
        assert_eq!(media_urls.len(), 1);
    }

    #[test]
    fn test_client_config_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telco.yaml");
        std::fs::write(&path, "api_key: KEYfile\nmax_retries: 5\n").unwrap();

        let cli = Cli::try_parse_from([
            "telco",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "http://localhost:9000/v2",
            "sim-cards",
            "get",
            "sim_1",
        ])
        .unwrap();

        let config = Runner::new(cli).client_config().unwrap();
        assert_eq!(config.api_key, "KEYfile");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_url, "http://localhost:9000/v2");
    }
}
