//! Environment configuration.

use anyhow::{Context, Result};

use shopkeep_core::Money;
use shopkeep_observability::LogFormat;

pub const STORE_NAME_VAR: &str = "SHOPKEEP_STORE_NAME";
pub const STARTING_MONEY_VAR: &str = "SHOPKEEP_STARTING_MONEY";
pub const LOG_FORMAT_VAR: &str = "SHOPKEEP_LOG_FORMAT";

const DEFAULT_STORE_NAME: &str = "Corner Shop";
const DEFAULT_STARTING_MONEY: Money = Money::from_cents(10_000);

/// Settings for the store a session starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub store_name: String,
    pub starting_money: Money,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_string(),
            starting_money: DEFAULT_STARTING_MONEY,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_name = match lookup(STORE_NAME_VAR) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                tracing::warn!("{STORE_NAME_VAR} not set; using {DEFAULT_STORE_NAME:?}");
                DEFAULT_STORE_NAME.to_string()
            }
        };

        let starting_money = match lookup(STARTING_MONEY_VAR) {
            Some(raw) => Money::parse(&raw)
                .with_context(|| format!("{STARTING_MONEY_VAR} must be a non-negative amount"))?,
            None => DEFAULT_STARTING_MONEY,
        };

        Ok(Self {
            store_name,
            starting_money,
        })
    }
}

/// Log output format; read before the subscriber exists, so nothing is logged here.
pub fn log_format_from_env() -> Result<LogFormat> {
    log_format_from_lookup(|key| std::env::var(key).ok())
}

pub fn log_format_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<LogFormat> {
    match lookup(LOG_FORMAT_VAR) {
        Some(raw) => raw
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid {LOG_FORMAT_VAR}")),
        None => Ok(LogFormat::default()),
    }
}
