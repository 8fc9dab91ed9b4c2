//! Core market-data domain types.
//!
//! Identifiers, search results and history points as the ESI endpoints
//! shape them. Everything here is plain data: built once (identifier
//! table) or consumed immediately after a fetch (history points).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Numeric identifier of a market region.
pub type RegionId = u32;

/// Numeric identifier of a tradable item type.
pub type TypeId = u32;

/// Result of an ESI `search` request, keyed by category.
///
/// The endpoint returns a mapping from category name to an ordered list of
/// matching ids and omits categories with no hits, hence the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    /// Region ids matching the search term.
    #[serde(default)]
    pub region: Vec<RegionId>,
    /// Item type ids matching the search term.
    #[serde(default)]
    pub inventory_type: Vec<TypeId>,
}

/// One day's aggregated trade statistics for an item type in a region.
///
/// The history endpoint carries more fields (highest, lowest, volume,
/// order_count); only the two the service reports are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryPoint {
    /// Calendar date of the aggregate (ISO, e.g. `2023-01-01`).
    pub date: NaiveDate,
    /// Average trade price for the day.
    pub average: Decimal,
}

/// Resolved identifiers the polling loop runs against.
///
/// Built once at startup, read-only thereafter. Items keep the order they
/// were configured in.
#[derive(Debug, Clone)]
pub struct IdentifierTable {
    region: RegionId,
    items: Vec<(String, TypeId)>,
}

impl IdentifierTable {
    /// Assemble the table from a resolved region and name→type pairs.
    pub fn new(region: RegionId, items: Vec<(String, TypeId)>) -> Self {
        Self { region, items }
    }

    /// The resolved region id.
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Resolved items in configuration order.
    pub fn items(&self) -> &[(String, TypeId)] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
