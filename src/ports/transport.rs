//! Transport Port - One Logical Session to the Market Endpoint
//!
//! The resilient client owns at most one live `Connection` at a time and
//! tears it down / reopens it as its retry policy dictates. Faults are
//! split into the "connection is unusable, reopen now" shape and
//! everything else, because the two get different recovery.

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level fault raised while opening a session or issuing a GET.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
  /// The connection is in an invalid state (died under keep-alive,
  /// response never became ready). The client reopens immediately.
  #[error("connection not ready: {0}")]
  NotReady(String),

  /// Any other protocol or I/O fault. Retried with standard backoff.
  #[error("http error: {0}")]
  Protocol(String),
}

/// Raw response off the wire, before any JSON handling.
#[derive(Debug, Clone)]
pub struct RawResponse {
  /// HTTP status code.
  pub status: u16,
  /// Response body as text.
  pub body: String,
}

/// A single open session to the remote host.
#[async_trait]
pub trait Connection: Send {
  /// Issue a GET for an absolute URL over this session.
  async fn get(&mut self, url: &str) -> Result<RawResponse, TransportError>;
}

/// Factory for sessions to one fixed remote host.
///
/// Opening is lazy and cheap; the session only dials out on first use.
#[async_trait]
pub trait Transport: Send + Sync {
  type Conn: Connection;

  /// Open a fresh session, replacing nothing — the caller owns handle
  /// lifetime and guarantees at most one live session per client.
  async fn connect(&self) -> Result<Self::Conn, TransportError>;
}
