use crate::commands::{Cli, Command, SendArgs};
use crate::config::{Config, ConfigLoader};
use crate::input::EventInput;
use crate::logging::setup_logging;
use anyhow::{Context, Result};
use clap::Parser;
use ingest_client::EventClient;
use tracing::{debug, info};

pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    // Use the --config flag, if provided, when loading the configuration
    let config = ConfigLoader::load_config(cli.config.as_deref())?
        .with_overrides(cli.endpoint.clone(), cli.token.clone());

    match cli.command {
        Command::Send(args) => tokio::runtime::Runtime::new()?.block_on(send(&config, &args)),
        Command::Config => {
            print_config_info(&config);
            Ok(())
        }
    }
}

pub fn build_client(config: &Config) -> Result<EventClient> {
    let mut http_client = reqwest::Client::builder();
    if let Some(timeout) = config.timeout() {
        http_client = http_client.timeout(timeout);
    }
    let http_client = http_client
        .build()
        .context("Failed to build HTTP client")?;

    EventClient::with_transport(config.client_config(), http_client)
        .context("Failed to create event client")
}

pub async fn send(config: &Config, args: &SendArgs) -> Result<()> {
    let client = build_client(config)?;
    let input = EventInput::from_args(args)?;
    let events = input.events();

    debug!("Loaded {} events", events.len());

    match client.send(events).await {
        Ok(response) => {
            info!("Delivered {} events to {}", events.len(), client.endpoint());
            println!(
                "Sent {} event(s) to {} ({})",
                events.len(),
                client.endpoint(),
                response.status()
            );
            Ok(())
        }
        Err(e) => {
            // main reports the error itself
            debug!("Delivery to {} failed", client.endpoint());
            Err(e.into())
        }
    }
}

pub fn print_config_info(config: &Config) {
    println!("Endpoint:       {}", display_or_unset(&config.endpoint));
    println!("Token:          {}", config.masked_token());
    match config.timeout_ms {
        Some(timeout_ms) => println!("Timeout:        {timeout_ms} ms"),
        None => println!("Timeout:        none"),
    }
    if config.config_sources.is_empty() {
        println!("Config sources: defaults and environment");
    } else {
        println!("Config sources: {}", config.config_sources.join(", "));
    }
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() {
        "<unset>"
    } else {
        value
    }
}
