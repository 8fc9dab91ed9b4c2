//! Market Data Port - Resilient JSON Requests
//!
//! The single operation the usecases need from the API layer: perform one
//! logical GET and hand back parsed JSON, with rate limiting, retry and
//! reconnect policy applied behind the trait. Failures surface as a typed
//! result, never a panic.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::transport::TransportError;

/// Terminal outcome classification for one logical request.
///
/// `Transport`, `Status` and `Decode` describe a single failed attempt and
/// are retried internally; only `Exhausted` (or success) escapes a
/// `MarketData::request` call once the retry budget is spent.
#[derive(Debug, Error)]
pub enum FetchError {
  /// Connection-level fault.
  #[error(transparent)]
  Transport(#[from] TransportError),

  /// The endpoint answered with a non-200 status.
  #[error("bad response status: {0}")]
  Status(u16),

  /// The endpoint answered 200 with a body that is not valid JSON.
  #[error("json error: {0}")]
  Decode(#[from] serde_json::Error),

  /// Every retry attempt failed.
  #[error("fetch failed for {url}")]
  Exhausted { url: String },
}

/// Resilient request interface over the market API.
#[async_trait]
pub trait MarketData: Send {
  /// GET `/{version}/{path}/` with `query` as the percent-encoded query
  /// string, returning the decoded JSON body.
  async fn request(
    &mut self,
    path: &str,
    query: &[(String, String)],
  ) -> Result<Value, FetchError>;

  /// Tear down the connection handle. The next `request` reopens
  /// transparently. Safe to call when nothing is open.
  fn close(&mut self);
}
