use anyhow::{Context, Result};
use config::{Config as RConfig, Environment, File};
use ingest_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_PREFIX: &str = "INGEST";
const CONFIG_DIR: &str = "ingest";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub token: String,
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub config_sources: Vec<String>,
}

impl Config {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.endpoint.clone(), self.token.clone())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Token with everything past the first four characters hidden
    pub fn masked_token(&self) -> String {
        if self.token.is_empty() {
            return "<unset>".to_string();
        }
        let visible: String = self.token.chars().take(4).collect();
        format!("{visible}***")
    }

    /// Flags from the command line win over every other source
    pub fn with_overrides(mut self, endpoint: Option<String>, token: Option<String>) -> Self {
        if endpoint.is_some() || token.is_some() {
            self.config_sources.push("command line".to_string());
        }
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(token) = token {
            self.token = token;
        }
        self
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Defaults, then the config file, then `INGEST_*` environment variables
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load_config(path: Option<&str>) -> Result<Config> {
        let mut builder = RConfig::builder()
            .set_default("endpoint", "")?
            .set_default("token", "")?;

        let mut sources = Vec::new();
        match path {
            Some(path) => {
                builder = builder.add_source(File::with_name(path).required(true));
                sources.push(path.to_string());
            }
            None => {
                if let Some(default_path) = Self::default_config_path() {
                    if default_path.exists() {
                        sources.push(default_path.display().to_string());
                    }
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }

        builder = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override("config_sources", sources)?;

        let config: Config = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;

        Ok(config)
    }
}
