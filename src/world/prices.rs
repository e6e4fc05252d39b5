//! Price oracle seam.
//!
//! The engine never simulates prices itself. It asks a `PriceOracle` for
//! the current buy and sell quote of an item at a location. `None` means
//! the good cannot be traded there.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Coins, Item, ItemId, Location, LocationId};

/// Read-only view of a market's current quotes.
#[cfg_attr(test, mockall::automock)]
pub trait PriceOracle {
    /// What the player pays to buy `item` at `location`.
    fn buy_price(&self, item: &Item, location: &Location) -> Option<Coins>;

    /// What the player receives for selling `item` at `location`.
    fn sell_price(&self, item: &Item, location: &Location) -> Option<Coins>;
}

/// Buy and sell quote for one (item, location) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub buy: Option<Coins>,
    pub sell: Option<Coins>,
}

/// In-memory price table keyed by item and location id.
///
/// Non-positive quotes are stored as given but reported as unavailable.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    quotes: HashMap<(ItemId, LocationId), Quote>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the quote for an item at a location.
    pub fn set(
        &mut self,
        item_id: impl Into<ItemId>,
        location_id: impl Into<LocationId>,
        buy: Option<Coins>,
        sell: Option<Coins>,
    ) {
        self.quotes
            .insert((item_id.into(), location_id.into()), Quote { buy, sell });
    }

    /// Builder-style variant of [`PriceTable::set`].
    pub fn with(
        mut self,
        item_id: impl Into<ItemId>,
        location_id: impl Into<LocationId>,
        buy: Option<Coins>,
        sell: Option<Coins>,
    ) -> Self {
        self.set(item_id, location_id, buy, sell);
        self
    }

    pub fn quote(&self, item_id: &str, location_id: &str) -> Option<Quote> {
        self.quotes
            .get(&(item_id.to_string(), location_id.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl PriceOracle for PriceTable {
    fn buy_price(&self, item: &Item, location: &Location) -> Option<Coins> {
        self.quote(&item.id, &location.id)
            .and_then(|q| q.buy)
            .filter(|p| *p > 0)
    }

    fn sell_price(&self, item: &Item, location: &Location) -> Option<Coins> {
        self.quote(&item.id, &location.id)
            .and_then(|q| q.sell)
            .filter(|p| *p > 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
