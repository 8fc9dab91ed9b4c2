//! ESI HTTP Client - Rate-limited Resilient REST Client
//!
//! Wraps the single logical HTTPS session with rate limiting, bounded
//! retries and escalating recovery for all ESI interactions. Callers see
//! parsed JSON or one typed failure per logical request; transient
//! connectivity trouble never leaks past this module.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::ports::clock::Clock;
use crate::ports::market_data::{FetchError, MarketData};
use crate::ports::transport::{Connection, Transport, TransportError};

use super::rate_limit::RateLimiter;
use super::retry::{AttemptPrep, RetrySchedule};

/// Configuration for the ESI client.
#[derive(Debug, Clone)]
pub struct EsiClientConfig {
  /// Scheme and host of the endpoint.
  pub base_url: String,
  /// API version path segment.
  pub version: String,
  /// Maximum attempts per logical request.
  pub max_retries: u32,
  /// Backoff between attempts.
  pub retry_timeout: Duration,
  /// Delay before the forced reopen on the second attempt.
  pub reopen_timeout: Duration,
  /// Request-rate ceiling (requests per second).
  pub request_rate: f64,
}

impl Default for EsiClientConfig {
  fn default() -> Self {
    Self {
      base_url: "https://esi.tech.ccp.is".to_string(),
      version: "latest".to_string(),
      max_retries: 5,
      retry_timeout: Duration::from_secs_f64(5.0),
      reopen_timeout: Duration::from_secs_f64(5.0),
      request_rate: 10.0,
    }
  }
}

/// Build `{base}/{version}/{path}/` plus a percent-encoded query string.
pub fn build_url(
  base_url: &str,
  version: &str,
  path: &str,
  query: &[(String, String)],
) -> String {
  let mut url = format!("{base_url}/{version}/{path}/");
  if !query.is_empty() {
    let encoded: Vec<String> = query
      .iter()
      .map(|(key, value)| {
        format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
      })
      .collect();
    url.push('?');
    url.push_str(&encoded.join("&"));
  }
  url
}

/// Resilient rate-limited client for the ESI REST API.
///
/// Owns the one logical connection to the endpoint: the handle is opened
/// lazily, force-reopened on the scheduled second attempt and on
/// not-ready faults, and dropped by `close()`.
pub struct EsiClient<T: Transport, K: Clock> {
  /// Session factory.
  transport: T,
  /// Time source for spacing, backoff and the reopen delay.
  clock: K,
  /// Inter-request spacing enforcement.
  limiter: RateLimiter,
  /// Client configuration.
  config: EsiClientConfig,
  /// The single live session, if any.
  conn: Option<T::Conn>,
}

impl<T: Transport, K: Clock> EsiClient<T, K> {
  /// Create a new client. No connection is opened until first use.
  pub fn new(transport: T, clock: K, config: EsiClientConfig) -> Self {
    let limiter = RateLimiter::new(config.request_rate);
    Self {
      transport,
      clock,
      limiter,
      config,
      conn: None,
    }
  }

  /// Drop the current session and open a fresh one.
  ///
  /// A failed open leaves the client unconnected; the next attempt
  /// reopens lazily.
  async fn reopen(&mut self) {
    self.conn = None;
    match self.transport.connect().await {
      Ok(conn) => self.conn = Some(conn),
      Err(e) => warn!(error = %e, "Reopen failed, deferring to next attempt"),
    }
  }

  /// Issue one GET on the current (or a fresh) session.
  async fn attempt(&mut self, url: &str) -> Result<Value, FetchError> {
    let mut conn = match self.conn.take() {
      Some(conn) => conn,
      None => self.transport.connect().await?,
    };
    let outcome = conn.get(url).await;
    self.conn = Some(conn);
    let response = outcome?;
    if response.status != 200 {
      return Err(FetchError::Status(response.status));
    }
    serde_json::from_str(&response.body).map_err(FetchError::from)
  }
}

#[async_trait]
impl<T: Transport, K: Clock> MarketData for EsiClient<T, K> {
  async fn request(
    &mut self,
    path: &str,
    query: &[(String, String)],
  ) -> Result<Value, FetchError> {
    let url = build_url(&self.config.base_url, &self.config.version, path, query);
    let mut schedule = RetrySchedule::new(self.config.max_retries);

    while let Some(attempt) = schedule.next_attempt() {
      match attempt.prep {
        AttemptPrep::ReopenConnection => {
          self.clock.sleep(self.config.reopen_timeout).await;
          self.reopen().await;
        }
        AttemptPrep::Pace => self.limiter.wait_turn(&self.clock).await,
      }

      match self.attempt(&url).await {
        Ok(value) => {
          debug!(%url, attempt = attempt.index, "Request succeeded");
          return Ok(value);
        }
        Err(FetchError::Transport(TransportError::NotReady(reason))) => {
          // The session is unusable; reopen now rather than waiting for
          // the scheduled slot.
          warn!(%url, %reason, "Connection not ready, reopening");
          self.reopen().await;
        }
        Err(e) => warn!(%url, error = %e, "Request attempt failed"),
      }

      if attempt.backoff_after {
        self.clock.sleep(self.config.retry_timeout).await;
      }
    }

    error!(%url, "Fetch failed, retries exhausted");
    Err(FetchError::Exhausted { url })
  }

  fn close(&mut self) {
    self.conn = None;
  }
}
