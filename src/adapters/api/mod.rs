//! ESI API Adapter - Resilient HTTP Access
//!
//! Implements the `MarketData` port over a single kept-alive reqwest
//! session, with rate limiting, bounded retries and escalating
//! reconnect recovery.

pub mod client;
pub mod rate_limit;
pub mod retry;
pub mod transport;
