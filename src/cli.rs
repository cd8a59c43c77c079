//! Command-line arguments and target validation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "seoscan", version, about = "Fetch a page and report its SEO metadata")]
pub struct Cli {
    /// Page to analyse (http or https)
    pub url: String,

    /// Print only the JSON report, without the summary
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Maximum number of redirects to follow
    #[arg(long, value_name = "N")]
    pub max_redirects: Option<usize>,

    /// User-Agent header to send
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit log lines as JSON on stderr
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Apply command-line overrides on top of an environment config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(max) = self.max_redirects {
            config = config.with_max_redirects(max);
        }
        if let Some(ua) = &self.user_agent {
            config = config.with_user_agent(ua.clone());
        }
        config
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Error, Debug)]
pub enum TargetError {
    #[error("invalid url '{url}': {source}")]
    Invalid {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported url scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

/// Syntax check of the target before any network activity.
pub fn validate_target(raw: &str) -> Result<Url, TargetError> {
    let url = Url::parse(raw.trim()).map_err(|source| TargetError::Invalid {
        url: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TargetError::UnsupportedScheme(other.to_string())),
    }
}
