//! EVM toolchain configuration management
//!
//! This module provides the typed configuration record consumed by the external
//! build/test/deploy toolchain. Configuration is resolved in priority order:
//!
//! 1. Process environment (ETHERSCAN_API_KEY, optionally seeded from `.env`)
//! 2. evmsync.toml declarations (compiler version, network descriptors)
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```rust,no_run
//! use evmsync_tools::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! println!("Compiler: {}", config.solidity);
//! println!("Networks: {}", config.networks.len());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Compiler release invoked when evmsync.toml does not configure one
pub const DEFAULT_SOLIDITY_VERSION: &str = "0.8.17";

/// Environment variable holding the explorer credential
pub const ETHERSCAN_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";

/// Configuration file resolved from the process working directory
const CONFIG_FILE: &str = "evmsync.toml";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Key-value source the loader reads environment state from.
///
/// Production code uses [`ProcessEnv`]; tests inject maps so resolution can be
/// exercised without mutating process-wide state.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Process environment backed by `std::env`.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Connection descriptor for a named network.
///
/// `accounts` entries are opaque sender credentials handed to the external
/// toolchain as-is; this crate never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// RPC endpoint
    pub url: String,
    /// Chain id announced to the toolchain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// Sender credentials, passed through uninterpreted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<String>,
}

/// Explorer verification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EtherscanConfig {
    /// Credential for the verification service; `None` when the variable is unset
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Resolved toolchain configuration.
///
/// Constructed once per load and treated as read-only afterwards; the external
/// toolchain consumes exactly this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Solidity compiler release
    pub solidity: String,
    /// Named network descriptors; empty when no remote targets are configured
    pub networks: BTreeMap<String, NetworkConfig>,
    /// Explorer verification settings
    pub etherscan: EtherscanConfig,
}

/// evmsync.toml file model
#[derive(Debug, Default, Deserialize)]
struct EvmsyncToml {
    solidity: Option<String>,
    #[serde(default)]
    networks: BTreeMap<String, NetworkConfig>,
}

impl Config {
    /// Load configuration from the environment and evmsync.toml
    ///
    /// # Resolution Order
    ///
    /// 1. Seed the process environment from `.env` if it exists
    /// 2. Load evmsync.toml if it exists
    /// 3. Read ETHERSCAN_API_KEY from the environment
    /// 4. Validate configured network descriptors
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - evmsync.toml exists but cannot be read or parsed
    /// - A configured network descriptor is malformed
    ///
    /// An unset credential and a missing file are not errors.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (non-fatal)
        let _ = dotenvy::dotenv();

        Self::load_with(Some(Path::new(CONFIG_FILE)), &ProcessEnv)
    }

    /// Load configuration from an explicit file path and environment source
    ///
    /// A `path` of `None` skips the file layer entirely. [`Config::load`]
    /// delegates here with the default path and [`ProcessEnv`].
    pub fn load_with(path: Option<&Path>, env: &impl EnvSource) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Self::load_file(path)?,
            None => None,
        };

        Self::build(file.unwrap_or_default(), Self::read_api_key(env))
    }

    /// Read the explorer credential, verbatim
    fn read_api_key(env: &impl EnvSource) -> Option<String> {
        let key = env.var(ETHERSCAN_API_KEY_VAR);
        if key.is_none() {
            log::debug!(
                "{} not set; verification stays unauthenticated",
                ETHERSCAN_API_KEY_VAR
            );
        }
        key
    }

    /// Load evmsync.toml; `Ok(None)` when the file does not exist
    fn load_file(path: &Path) -> Result<Option<EvmsyncToml>, ConfigError> {
        if !path.exists() {
            log::debug!("no {} found, using defaults", path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let file: EvmsyncToml = toml::from_str(&content)?;
        log::debug!(
            "loaded {} with {} network(s)",
            path.display(),
            file.networks.len()
        );
        Ok(Some(file))
    }

    /// Assemble the record from file-layer values and the credential
    fn build(file: EvmsyncToml, api_key: Option<String>) -> Result<Self, ConfigError> {
        let solidity = file
            .solidity
            .unwrap_or_else(|| DEFAULT_SOLIDITY_VERSION.to_string());

        Self::validate(&file.networks)?;

        Ok(Config {
            solidity,
            networks: file.networks,
            etherscan: EtherscanConfig { api_key },
        })
    }

    /// Validate configured network descriptors
    fn validate(networks: &BTreeMap<String, NetworkConfig>) -> Result<(), ConfigError> {
        for (name, network) in networks {
            if network.url.is_empty() {
                return Err(ConfigError::MissingField(format!("networks.{}.url", name)));
            }

            let scheme_ok = ["http://", "https://", "ws://", "wss://"]
                .iter()
                .any(|scheme| network.url.starts_with(scheme));
            if !scheme_ok {
                return Err(ConfigError::ValidationError(format!(
                    "network {} URL must start with http(s):// or ws(s)://: {}",
                    name, network.url
                )));
            }
        }

        Ok(())
    }

    /// Print the resolved configuration
    ///
    /// The explorer credential is reported as configured or not, never echoed.
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════════╗");
        println!("║            EVMSYNC TOOLCHAIN CONFIGURATION RESOLVED            ║");
        println!("╚════════════════════════════════════════════════════════════════╝");
        println!("  Solidity:            {}", self.solidity);

        if self.networks.is_empty() {
            println!("  Networks:            (none configured)");
        } else {
            for (name, network) in &self.networks {
                match network.chain_id {
                    Some(id) => {
                        println!("  Network {:<12} {} (chain id {})", name, network.url, id)
                    }
                    None => println!("  Network {:<12} {}", name, network.url),
                }
            }
        }

        if self.etherscan.api_key.is_some() {
            println!("  Etherscan API Key:   (configured)");
        } else {
            println!("  Etherscan API Key:   (not configured)");
        }

        println!("╚════════════════════════════════════════════════════════════════╝");
    }

    /// Get configuration as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
