//! Environment configuration for the indexer.
//!
//! Every setting lives under the `ZINC_` prefix so the indexer can share an
//! environment file with the ZincSearch container it feeds.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PREFIX: &str = "ZINC_";

const DEFAULT_BASE_URL: &str = "http://localhost:4080";
const DEFAULT_INDEX: &str = "mails";
const DEFAULT_MAX_RETRIES: u32 = 0;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {key} is not valid unicode")]
    NotUnicode { key: String },
    #[error("invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Rejects `ZINC_` variables that cannot be read as text.
///
/// Runs before any other lookup so that a broken environment stops the run
/// before any work is done.
pub fn validate_prefixed_env<I>(vars: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    for (key, value) in vars {
        let Some(key) = key.to_str() else {
            continue;
        };
        if key.starts_with(ENV_PREFIX) && value.to_str().is_none() {
            return Err(ConfigError::NotUnicode {
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

fn lookup_string<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn lookup_parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|err| ConfigError::Invalid {
                key: key.to_string(),
                value: value.clone(),
                reason: err.to_string(),
            }),
    }
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Admin credentials used for basic auth against the store.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Absent variables yield empty strings; the store decides whether to
    /// accept them.
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            username: lookup_string(&lookup, "ZINC_FIRST_ADMIN_USER", ""),
            password: lookup_string(&lookup, "ZINC_FIRST_ADMIN_PASSWORD", ""),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Location of the ZincSearch instance and bulk submission tuning.
#[derive(Debug, Clone)]
pub struct ZincConfig {
    pub base_url: String,
    pub index: String,
    /// Documents per bulk request; `0` sends the whole buffer at once.
    pub batch_size: usize,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub request_timeout: Duration,
}

impl ZincConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup_string(&lookup, "ZINC_URL", DEFAULT_BASE_URL);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "ZINC_URL".to_string(),
                value: base_url,
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }

        let index = lookup_string(&lookup, "ZINC_INDEX", DEFAULT_INDEX);
        if index.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "ZINC_INDEX".to_string(),
                value: index,
                reason: "index name must not be empty".to_string(),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            index,
            batch_size: lookup_parsed(&lookup, "ZINC_BATCH_SIZE", 0usize)?,
            max_retries: lookup_parsed(&lookup, "ZINC_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            retry_backoff: Duration::from_millis(lookup_parsed(
                &lookup,
                "ZINC_RETRY_BACKOFF_MS",
                DEFAULT_RETRY_BACKOFF_MS,
            )?),
            request_timeout: Duration::from_millis(lookup_parsed(
                &lookup,
                "ZINC_TIMEOUT_MS",
                DEFAULT_TIMEOUT_MS,
            )?),
        })
    }
}

impl Default for ZincConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index: DEFAULT_INDEX.to_string(),
            batch_size: 0,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}
