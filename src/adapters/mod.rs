//! Adapters Layer - Concrete Implementations of the Ports
//!
//! - `api`: the resilient ESI HTTP client (reqwest transport, rate
//!   limiter, retry schedule)
//! - `clock`: tokio-backed production clock plus a virtual-time manual
//!   clock for tests

pub mod api;
pub mod clock;
