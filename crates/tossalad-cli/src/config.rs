//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tossalad_store::{FetchPolicy, FileStore, RecordStore};
use tossalad_sync::RestStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Audit stored ToS analyses for genuineness and score consistency.
#[derive(Debug, Parser)]
#[command(name = "tossalad-audit", version, about)]
pub struct Config {
    /// Base URL of the hosted database REST endpoint.
    #[arg(long, env = "TOSSALAD_STORE_URL")]
    pub store_url: Option<String>,

    /// API key sent with every request.
    #[arg(long, env = "TOSSALAD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Read companies from a JSON fixture instead of the hosted store.
    #[arg(long, env = "TOSSALAD_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fetch attempts before giving up.
    #[arg(long, default_value_t = 2)]
    pub attempts: u32,

    /// Per-attempt fetch timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            attempts: self.attempts,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Build the configured store. A fixture takes precedence over a URL.
    pub fn store(&self) -> anyhow::Result<Box<dyn RecordStore>> {
        if let Some(path) = &self.fixture {
            return Ok(Box::new(FileStore::new(path.clone())));
        }
        match (&self.store_url, &self.api_key) {
            (Some(url), Some(key)) => Ok(Box::new(RestStore::new(url.clone(), key.clone()))),
            (Some(_), None) => anyhow::bail!("--api-key (or TOSSALAD_API_KEY) is required with a store URL"),
            (None, _) => anyhow::bail!(
                "no store configured: set TOSSALAD_STORE_URL and TOSSALAD_API_KEY, or TOSSALAD_FIXTURE"
            ),
        }
    }
}
