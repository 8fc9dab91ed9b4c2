//! Reqwest Transport - HTTPS Sessions for the ESI Endpoint
//!
//! Implements the `Transport`/`Connection` ports over reqwest with
//! rustls. One `reqwest::Client` per logical connection handle, idle
//! pool capped at a single connection, so the handle behaves like one
//! kept-alive HTTPS session that the resilient client can tear down and
//! reopen at will.

use async_trait::async_trait;
use reqwest::Client;

use crate::ports::transport::{Connection, RawResponse, Transport, TransportError};

/// Session factory for the ESI endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

/// One kept-alive HTTPS session.
pub struct ReqwestConnection {
  http: Client,
}

#[async_trait]
impl Transport for ReqwestTransport {
  type Conn = ReqwestConnection;

  async fn connect(&self) -> Result<ReqwestConnection, TransportError> {
    // No request timeout: the retry/reopen policy is the only bound the
    // service places on individual calls.
    let http = Client::builder()
      .pool_max_idle_per_host(1)
      .build()
      .map_err(|e| TransportError::Protocol(e.to_string()))?;
    Ok(ReqwestConnection { http })
  }
}

#[async_trait]
impl Connection for ReqwestConnection {
  async fn get(&mut self, url: &str) -> Result<RawResponse, TransportError> {
    let response = self.http.get(url).send().await.map_err(classify)?;
    let status = response.status().as_u16();
    // A body that dies mid-read means the session is unusable.
    let body = response
      .text()
      .await
      .map_err(|e| TransportError::NotReady(e.to_string()))?;
    Ok(RawResponse { status, body })
  }
}

/// Split reqwest faults into the reopen-now shape vs. plain protocol
/// errors.
fn classify(error: reqwest::Error) -> TransportError {
  if error.is_connect() || error.is_timeout() {
    TransportError::NotReady(error.to_string())
  } else {
    TransportError::Protocol(error.to_string())
  }
}
