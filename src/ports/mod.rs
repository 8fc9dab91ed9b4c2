//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `MarketData`: resilient JSON request/close against the market API
//! - `Transport`/`Connection`: one logical HTTPS session to the endpoint
//! - `Clock`: injectable time source so sleeps are simulable in tests

pub mod clock;
pub mod market_data;
pub mod transport;
