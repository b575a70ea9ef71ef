//! EvmSync Tools Library
//!
//! Provides configuration management for EVM smart contract build, deployment
//! and verification tooling.

pub mod config;

pub use config::{Config, ConfigError, EnvSource, EtherscanConfig, NetworkConfig, ProcessEnv};
