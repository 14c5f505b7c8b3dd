//! Configuration management for slot20
//!
//! This crate provides functionality for managing the slot20 configuration,
//! including loading, saving, updating, and deleting configuration settings.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use clap::Parser;
use serde::{Deserialize, Serialize};
use slot20_common::{
    constants::{DEFAULT_CONCURRENCY, DEFAULT_RPC_URL, DEFAULT_SLOT_LIMIT},
    utils::io::file::{delete_path, read_file, write_file},
};
#[allow(deprecated)]
use std::env::home_dir;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "slot20 config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    pub key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    pub value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. Command line flags take
/// precedence over it, and it takes precedence over the built-in defaults.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// The URL for the Ethereum RPC endpoint
    pub rpc_url: String,

    /// The highest slot index probed when `--limit` is not given
    pub limit: u64,

    /// The number of storage probes kept in flight when `--concurrency` is not given
    pub concurrency: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            limit: DEFAULT_SLOT_LIMIT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// The location of the configuration file, `$HOME/.slot20/config.toml`.
#[allow(deprecated)]
fn config_path() -> Result<String, Error> {
    let mut home: PathBuf = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(".slot20");
    home.push("config.toml");

    home.to_str()
        .map(|path| path.to_string())
        .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

impl Configuration {
    /// Returns the current configuration.
    pub fn load() -> Result<Self, Error> {
        let path = config_path()?;

        // if the config file doesn't exist, create it
        if !std::path::Path::new(&path).exists() {
            let config = Configuration::default();
            config.save()?;
        }

        // read the config file
        let contents = read_file(&path)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        // parse the config file
        let mut config: Configuration = toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))?;

        // load mesc config if enabled
        if !mesc::is_mesc_enabled() {
            return Ok(config);
        }

        if let Some(endpoint) = mesc::get_default_endpoint(Some("slot20"))
            .map_err(|e| Error::Generic(format!("MESC error: {e}")))?
        {
            debug!("overriding rpc_url with mesc endpoint");
            config.rpc_url = endpoint.url;
        }

        Ok(config)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        write_file(
            &config_path()?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.slot20/config.toml`.
    pub fn delete() -> Result<(), Error> {
        delete_path(&config_path()?)
            .map_err(|e| Error::Generic(format!("failed to delete config file: {e}")))
    }

    /// Update a single key/value pair in the configuration.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        // update the key in the struct and ensure it's the correct type
        match key {
            "rpc_url" => {
                self.rpc_url = value.to_string();
            }
            "limit" => {
                self.limit = value.parse::<u64>().map_err(|_| {
                    Error::ParseError(format!("invalid value: \'{value}\' is not a valid slot limit."))
                })?;
            }
            "concurrency" => {
                self.concurrency = value
                    .parse::<usize>()
                    .ok()
                    .filter(|concurrency| *concurrency > 0)
                    .ok_or_else(|| {
                        Error::ParseError(format!(
                            "invalid value: \'{value}\' is not a positive integer."
                        ))
                    })?;
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        // write the updated config to disk
        self.save()?;

        Ok(())
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            // read the config file and update the key/value pair
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            error!("found key but no value to set. Please specify a value to set, use `slot20 config --help` for more information.");
        }
    } else {
        // no key is set, print the config file
        println!("{:#?}", Configuration::load()?);
        info!("use `slot20 config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}

/// Parse user input --rpc into a full url
pub fn parse_url_arg(url: &str) -> Result<String, String> {
    if mesc::is_mesc_enabled() {
        if let Ok(Some(endpoint)) = mesc::get_endpoint_by_query(url, Some("slot20")) {
            return Ok(endpoint.url);
        }
    }
    Ok(url.to_string())
}
