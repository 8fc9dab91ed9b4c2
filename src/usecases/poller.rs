//! Market Poller - Steady-state Polling Loop
//!
//! The top-level driver: on a fixed wall-clock interval, fetches market
//! history for each resolved item and reports the latest data point on
//! stdout. Fetch failures are never fatal here; a failed item abandons
//! the rest of its cycle, defers polling for an hour and the service
//! keeps running. The connection is closed after every cycle so idle
//! periods never hold a session open.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::domain::market::{HistoryPoint, IdentifierTable};
use crate::ports::clock::Clock;
use crate::ports::market_data::MarketData;

/// How long a failed cycle is deferred before polling resumes.
const DEFER_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Outcome of one polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
  /// Every item was attempted; the regular interval sleep follows.
  Completed,
  /// A fetch failed: the remaining items were abandoned and the
  /// one-hour defer has already elapsed. The next cycle starts
  /// immediately.
  Deferred,
}

/// The polling service loop.
pub struct MarketPoller<C: MarketData, K: Clock, W: Write> {
  /// Resilient API client; owns the one connection.
  client: C,
  /// Time source for the interval and defer sleeps.
  clock: K,
  /// Identifiers resolved at startup; read-only from here on.
  table: IdentifierTable,
  /// Sleep between full cycles.
  interval: Duration,
  /// Where measurements are reported (stdout in production).
  out: W,
}

impl<C: MarketData, K: Clock, W: Write> MarketPoller<C, K, W> {
  pub fn new(
    client: C,
    clock: K,
    table: IdentifierTable,
    interval: Duration,
    out: W,
  ) -> Self {
    Self {
      client,
      clock,
      table,
      interval,
      out,
    }
  }

  /// Run forever. Only an output-stream failure ends the loop.
  pub async fn run(&mut self) -> Result<()> {
    info!(
      items = self.table.len(),
      region = self.table.region(),
      "Starting service"
    );
    loop {
      if self.poll_cycle().await? == CycleStatus::Deferred {
        continue;
      }
      self.clock.sleep(self.interval).await;
    }
  }

  /// One pass over the identifier table.
  pub async fn poll_cycle(&mut self) -> Result<CycleStatus> {
    let region = self.table.region();
    let items = self.table.items().to_vec();

    for (name, type_id) in items {
      let path = format!("markets/{region}/history");
      let query = [("type_id".to_string(), type_id.to_string())];

      let latest = match self.client.request(&path, &query).await {
        Ok(value) => match serde_json::from_value::<Vec<HistoryPoint>>(value) {
          // History is sorted ascending by date; the last entry is the
          // most recent.
          Ok(mut points) => points.pop(),
          Err(e) => {
            warn!(
              item = %name,
              error = %e,
              "Malformed market history payload, retrying in 1h"
            );
            return self.defer().await;
          }
        },
        Err(e) => {
          warn!(
            item = %name,
            error = %e,
            "Could not retrieve market history, retrying in 1h"
          );
          return self.defer().await;
        }
      };

      match latest {
        Some(point) => {
          writeln!(
            self.out,
            "market history: {} {} {}",
            name, point.date, point.average
          )?;
          self.out.flush()?;
        }
        None => warn!(item = %name, "Empty market history, skipping"),
      }
    }

    self.client.close();
    Ok(CycleStatus::Completed)
  }

  /// Abandon the cycle: drop the connection and sit out the defer.
  async fn defer(&mut self) -> Result<CycleStatus> {
    self.client.close();
    self.clock.sleep(DEFER_INTERVAL).await;
    Ok(CycleStatus::Deferred)
  }

  /// Close the connection on shutdown.
  pub fn shutdown(&mut self) {
    self.client.close();
  }
}
