//! Command implementations for the rsuite CLI

pub mod compile;
pub mod describe;
pub mod report;
pub mod suites;

use anyhow::{Context, Result};
use rsuite_client::Account;
use rsuite_config::Config;
use serde::Serialize;

/// Connect to the API with the configured credentials
pub fn connect(config: &Config) -> Result<Account> {
    config
        .api
        .validate_credentials()
        .context("API credentials are incomplete (set them in [api] or RSUITE_* variables)")?;

    Account::connect(&config.api).context("failed to create API client")
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
