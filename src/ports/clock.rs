//! Clock Port - Injectable Time Source
//!
//! All waiting in the service (rate-limit spacing, retry backoff, the
//! reopen delay, inter-cycle sleeps, the one-hour defer) goes through
//! this trait, so tests can advance virtual time instead of sleeping.

use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Monotonic time capability.
///
/// `now()` must be monotonic (wall-clock adjustments must not move it
/// backwards); `sleep()` suspends the single logical task.
#[async_trait]
pub trait Clock: Send + Sync {
  /// Current monotonic instant.
  fn now(&self) -> Instant;

  /// Suspend for at least `duration`.
  async fn sleep(&self, duration: Duration);
}
