//! TOML config loading
use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Reads, parses and validates the config at `path`
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    parse_config(&fs::read_to_string(path)?)
}

/// Parses and validates configuration from TOML text
pub(crate) fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex SHA-256 of the config file
///
/// Logged at startup so a run's output can be traced back to the exact
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    Ok(hash_content(&fs::read_to_string(path)?))
}

/// Loads a config together with the hash of the bytes that were parsed
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
