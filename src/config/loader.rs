//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration. A missing file
//! falls back to the built-in defaults; a file that is present but
//! unparseable or invalid is a fatal startup error.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read or parsed
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  if !path.exists() {
    info!(path = %path.display(), "No config file, using built-in defaults");
    let config = AppConfig::default();
    validate_config(&config)?;
    return Ok(config);
  }

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| format!("Failed to parse {}", path.display()))?;

  validate_config(&config)?;

  info!(
    endpoint = %config.api.endpoint,
    region = %config.poll.region,
    items = config.poll.items.len(),
    "Configuration loaded"
  );

  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.api.endpoint.is_empty(),
    "api.endpoint must not be empty"
  );
  anyhow::ensure!(
    !config.api.version.is_empty(),
    "api.version must not be empty"
  );
  anyhow::ensure!(
    config.api.max_retries >= 1,
    "api.max_retries must be at least 1, got {}",
    config.api.max_retries
  );
  anyhow::ensure!(
    config.api.request_rate.is_finite() && config.api.request_rate > 0.0,
    "api.request_rate must be positive, got {}",
    config.api.request_rate
  );
  anyhow::ensure!(
    config.api.retry_timeout_secs.is_finite() && config.api.retry_timeout_secs >= 0.0,
    "api.retry_timeout_secs must be non-negative, got {}",
    config.api.retry_timeout_secs
  );
  anyhow::ensure!(
    config.api.reopen_timeout_secs.is_finite() && config.api.reopen_timeout_secs >= 0.0,
    "api.reopen_timeout_secs must be non-negative, got {}",
    config.api.reopen_timeout_secs
  );

  anyhow::ensure!(
    config.poll.measurement_interval_hours >= 1,
    "poll.measurement_interval_hours must be at least 1, got {}",
    config.poll.measurement_interval_hours
  );
  anyhow::ensure!(
    !config.poll.region.is_empty(),
    "poll.region must not be empty"
  );
  anyhow::ensure!(
    !config.poll.items.is_empty(),
    "At least one item must be configured"
  );
  for (i, item) in config.poll.items.iter().enumerate() {
    anyhow::ensure!(!item.is_empty(), "poll.items[{}] is empty", i);
  }

  Ok(())
}
