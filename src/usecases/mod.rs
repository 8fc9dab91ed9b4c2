//! Usecases Layer - Startup Resolution and the Polling Loop
//!
//! - `resolver`: translates configured names into numeric identifiers
//!   once, before polling begins (failures here are fatal)
//! - `poller`: the steady-state driver reporting the latest history
//!   point per item on a fixed interval (failures here never are)

pub mod poller;
pub mod resolver;
