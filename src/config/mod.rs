//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml`. The endpoint,
//! retry policy and the polled item list are all externalized here -
//! nothing is hardcoded in the usecases layer. Every field has a
//! built-in default, so the service runs without a config file at all.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

/// Top-level service configuration.
///
/// Loaded from `config.toml` at startup and validated before the
/// service begins operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Service identity and logging.
  pub service: ServiceConfig,
  /// ESI endpoint and request policy.
  pub api: ApiConfig,
  /// What to poll and how often.
  pub poll: PollConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
  /// Human-readable service name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  pub log_level: String,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      name: "esi-market-watch".to_string(),
      log_level: "info".to_string(),
    }
  }
}

/// ESI endpoint and retry policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  /// Endpoint host, scheme-less.
  pub endpoint: String,
  /// API version path segment.
  pub version: String,
  /// Attempts before a request is abandoned.
  pub max_retries: u32,
  /// Seconds between retry attempts.
  pub retry_timeout_secs: f64,
  /// Seconds to wait before the forced reconnect on the second attempt.
  pub reopen_timeout_secs: f64,
  /// Maximum request rate (requests per second).
  pub request_rate: f64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      endpoint: "esi.tech.ccp.is".to_string(),
      version: "latest".to_string(),
      max_retries: 5,
      retry_timeout_secs: 5.0,
      reopen_timeout_secs: 5.0,
      request_rate: 10.0,
    }
  }
}

/// Polling target configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollConfig {
  /// Measurement interval in hours (minimum 1).
  pub measurement_interval_hours: u64,
  /// Region whose market history is polled.
  pub region: String,
  /// Item names to poll, in reporting order.
  pub items: Vec<String>,
}

impl PollConfig {
  /// Sleep between full polling cycles.
  pub const fn interval(&self) -> Duration {
    Duration::from_secs(self.measurement_interval_hours * 60 * 60)
  }
}

impl Default for PollConfig {
  fn default() -> Self {
    Self {
      measurement_interval_hours: 1,
      region: "The Forge".to_string(),
      items: vec![
        "PLEX".to_string(),
        "Large Skill Injector".to_string(),
        "Skill Extractor".to_string(),
      ],
    }
  }
}
