use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "ingest",
    about = "Send events to an HTTP ingestion endpoint",
    version
)]
pub struct Cli {
    /// Path to a TOML config file
    #[clap(long, global = true)]
    pub config: Option<String>,

    /// Ingestion endpoint, overrides the config file and INGEST_ENDPOINT
    #[clap(long, global = true)]
    pub endpoint: Option<String>,

    /// Bearer token, overrides the config file and INGEST_TOKEN
    #[clap(long, global = true)]
    pub token: Option<String>,

    /// Log at debug level
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Send one event or a batch in a single request
    Send(SendArgs),

    /// Show the resolved configuration
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Type of the event to build from the command line
    #[clap(long = "type", conflicts_with = "file", required_unless_present = "file")]
    pub kind: Option<String>,

    /// Extra field as key=value; the value is parsed as JSON when possible
    #[clap(long = "field", value_parser = parse_field, requires = "kind")]
    pub fields: Vec<(String, Value)>,

    /// JSON file holding an event object or an array of events, `-` for stdin
    #[clap(long)]
    pub file: Option<String>,
}

pub fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;

    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }

    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
