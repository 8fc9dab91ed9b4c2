//! Identifier Resolver - Startup Name Resolution
//!
//! Translates configuration-level names (one region, a list of item
//! names) into API-level numeric identifiers via the strict search
//! endpoint. Runs once before polling begins. Any failure here is fatal:
//! the identifier table is required for all subsequent operation, and
//! the client underneath has already retried transport trouble.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::market::{RegionId, SearchResults, TypeId};
use crate::ports::market_data::{FetchError, MarketData};

/// Fatal startup resolution failure.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// The client gave up after its full retry budget.
  #[error("failed to communicate with server: {0}")]
  Fetch(#[from] FetchError),

  /// The search succeeded but matched nothing; a bad name in config.
  #[error("no {category} found matching {name:?}")]
  NoMatch {
    category: &'static str,
    name: String,
  },

  /// The search payload did not have the expected shape.
  #[error("unexpected search payload: {0}")]
  Malformed(#[from] serde_json::Error),
}

/// Startup-only resolver over the market data port.
pub struct Resolver<'c, C: MarketData> {
  client: &'c mut C,
}

impl<'c, C: MarketData> Resolver<'c, C> {
  pub fn new(client: &'c mut C) -> Self {
    Self { client }
  }

  /// Strict search in one category.
  async fn search(
    &mut self,
    category: &'static str,
    name: &str,
  ) -> Result<SearchResults, ResolveError> {
    let query = [
      ("categories".to_string(), category.to_string()),
      ("strict".to_string(), "true".to_string()),
      ("search".to_string(), name.to_string()),
    ];
    let value: Value = self.client.request("search", &query).await?;
    Ok(serde_json::from_value(value)?)
  }

  /// Resolve the configured region name to its id.
  pub async fn resolve_region(&mut self, name: &str) -> Result<RegionId, ResolveError> {
    info!(region = %name, "Fetching region id");
    let results = self.search("region", name).await?;
    let id = results
      .region
      .first()
      .copied()
      .ok_or_else(|| ResolveError::NoMatch {
        category: "region",
        name: name.to_string(),
      })?;
    debug!(region = %name, id, "Region resolved");
    Ok(id)
  }

  /// Resolve every configured item name, preserving order.
  ///
  /// The first unresolvable name aborts; a partial table is useless.
  pub async fn resolve_item_types(
    &mut self,
    names: &[String],
  ) -> Result<Vec<(String, TypeId)>, ResolveError> {
    info!(count = names.len(), "Fetching type ids");
    let mut items = Vec::with_capacity(names.len());
    for name in names {
      let results = self.search("inventory_type", name).await?;
      let id = results
        .inventory_type
        .first()
        .copied()
        .ok_or_else(|| ResolveError::NoMatch {
          category: "inventory_type",
          name: name.clone(),
        })?;
      debug!(item = %name, id, "Item type resolved");
      items.push((name.clone(), id));
    }
    Ok(items)
  }
}
