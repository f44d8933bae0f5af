//! Configuration module
//!
//! Settings are read once at startup from the environment (and a `.env` file
//! when present).

use std::env;
use std::path::PathBuf;

use anyhow::Context;

const SERVER_PORT: u16 = 3000;
const IMAGE_FETCH_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// Maximum total size of a POST callback body in bytes. `None` means unbounded.
    pub max_request_size: Option<u64>,
    pub image_fetch_timeout_secs: u64,
    // Hosts allowed in GET image URLs. If unset, any host is allowed.
    // Example: "pixlr.com,apps.pixlr.com"
    pub image_url_allowlist: Option<Vec<String>>,
    /// Directory receiving saved images. If unset, results are only logged.
    pub save_directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            max_request_size: None,
            image_fetch_timeout_secs: IMAGE_FETCH_TIMEOUT_SECS,
            image_url_allowlist: None,
            save_directory: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = lookup("SERVER_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(SERVER_PORT);

        let max_request_size = match lookup("MAX_REQUEST_SIZE") {
            Some(value) if !value.trim().is_empty() => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("MAX_REQUEST_SIZE must be a byte count, got '{}'", value))?,
            ),
            _ => None,
        };

        let image_fetch_timeout_secs = lookup("IMAGE_FETCH_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(IMAGE_FETCH_TIMEOUT_SECS);

        let image_url_allowlist = lookup("IMAGE_URL_ALLOWLIST")
            .map(|s| {
                s.split(',')
                    .map(|host| host.trim().to_lowercase())
                    .filter(|host| !host.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|hosts| !hosts.is_empty());

        let save_directory = lookup("SAVE_DIRECTORY")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            server_port,
            environment,
            max_request_size,
            image_fetch_timeout_secs,
            image_url_allowlist,
            save_directory,
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn max_request_size(&self) -> Option<u64> {
        self.max_request_size
    }

    pub fn image_url_allowlist(&self) -> Option<&[String]> {
        self.image_url_allowlist.as_deref()
    }
}
