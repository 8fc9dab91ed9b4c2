//! Domain Layer - Market Data Types
//!
//! Identifier and history-point types shared by ports, adapters and
//! usecases. No I/O, no policy — plain data only.

pub mod market;
