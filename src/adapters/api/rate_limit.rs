//! Request Rate Limiter - Minimum Inter-request Spacing
//!
//! Enforces the endpoint's request-rate ceiling by spacing successive
//! requests at least `1/request_rate` seconds apart. Monotonic-clock
//! arithmetic only, so wall-clock adjustments never distort the spacing.

use std::time::{Duration, Instant};

use crate::ports::clock::Clock;

/// Spaces calls at a configured minimum interval.
///
/// `wait_turn` has no side effects besides the delay and no error
/// conditions; the first turn is always free.
#[derive(Debug)]
pub struct RateLimiter {
  interval: Duration,
  last_turn: Option<Instant>,
}

impl RateLimiter {
  /// Build a limiter for `request_rate` requests per second.
  ///
  /// A non-positive or non-finite rate disables spacing entirely.
  pub fn new(request_rate: f64) -> Self {
    let interval = if request_rate > 0.0 && request_rate.is_finite() {
      Duration::from_secs_f64(request_rate.recip())
    } else {
      Duration::ZERO
    };
    Self {
      interval,
      last_turn: None,
    }
  }

  /// The enforced minimum spacing between turns.
  pub const fn interval(&self) -> Duration {
    self.interval
  }

  /// Block until at least one interval has elapsed since the previous
  /// call returned.
  pub async fn wait_turn<K: Clock>(&mut self, clock: &K) {
    if let Some(last) = self.last_turn {
      let elapsed = clock.now().saturating_duration_since(last);
      if elapsed < self.interval {
        clock.sleep(self.interval - elapsed).await;
      }
    }
    self.last_turn = Some(clock.now());
  }
}
