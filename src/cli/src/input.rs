use crate::commands::SendArgs;
use anyhow::{bail, Context, Result};
use ingest_client::{Event, Events};
use serde_json::Value;
use std::io::Read;

const STDIN_PATH: &str = "-";

/// Events collected from the command line, a file or stdin
#[derive(Debug, PartialEq)]
pub enum EventInput {
    Single(Event),
    Batch(Vec<Event>),
}

impl EventInput {
    pub fn events(&self) -> Events<'_> {
        match self {
            EventInput::Single(event) => Events::from(event),
            EventInput::Batch(events) => Events::from(events),
        }
    }

    pub fn from_args(args: &SendArgs) -> Result<Self> {
        if let Some(path) = &args.file {
            let raw = read_source(path)?;
            return Self::parse(&raw).with_context(|| format!("invalid events in {path}"));
        }

        let Some(kind) = &args.kind else {
            bail!("either --type or --file is required");
        };

        let mut event = Event::new(kind.as_str())?;
        for (key, value) in &args.fields {
            event = event.with_field(key.as_str(), value.clone())?;
        }
        Ok(EventInput::Single(event))
    }

    /// A JSON object is one event, a JSON array is a batch
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("input is not valid JSON")?;

        match value {
            Value::Array(items) => {
                let events = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        Event::try_from(item).with_context(|| format!("event #{index}"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(EventInput::Batch(events))
            }
            value => Ok(EventInput::Single(Event::try_from(value)?)),
        }
    }
}

fn read_source(path: &str) -> Result<String> {
    if path == STDIN_PATH {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read events from stdin")?;
        return Ok(raw);
    }

    std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}
