use crate::config::types::{Config, OutputConfig, RunConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound for any concurrency window
const MAX_WINDOW: u32 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_run_config(&config.run)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the remote service configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    if config.client_identifier.trim().is_empty() {
        return Err(ConfigError::Validation(
            "client-identifier cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates run tunables
fn validate_run_config(config: &RunConfig) -> Result<(), ConfigError> {
    validate_window("window", config.window)?;

    if let Some(width) = config.list_window {
        validate_window("list-window", width)?;
    }

    if let Some(width) = config.detail_window {
        validate_window("detail-window", width)?;
    }

    Ok(())
}

fn validate_window(name: &str, width: u32) -> Result<(), ConfigError> {
    if width < 1 || width > MAX_WINDOW {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_WINDOW, width
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
