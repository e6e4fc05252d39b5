//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs:
//! engine tuning plus the market scenario (catalog, locations, quotes and
//! the player) that the engine is queried against.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use tracing::{debug, warn};

use crate::engine::calculator::ArbitrageConfig;
use crate::types::{Coins, Item, ItemId, Location, LocationId};
use crate::world::prices::PriceTable;
use crate::world::snapshot::{PlayerSnapshot, WorldSnapshot};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub player: PlayerSnapshot,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_travel_cost")]
    pub travel_cost_per_distance: Coins,
    #[serde(default = "default_max_stops")]
    pub default_max_stops: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            travel_cost_per_distance: default_travel_cost(),
            default_max_stops: default_max_stops(),
        }
    }
}

fn default_travel_cost() -> Coins {
    ArbitrageConfig::default().travel_cost_per_distance
}

fn default_max_stops() -> usize {
    ArbitrageConfig::default().default_max_stops
}

/// One quote line. Omitted prices mean the good is not traded that way.
#[derive(Debug, Deserialize, Clone)]
pub struct PriceEntry {
    pub item: ItemId,
    pub location: LocationId,
    pub buy: Option<Coins>,
    pub sell: Option<Coins>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn arbitrage_config(&self) -> ArbitrageConfig {
        ArbitrageConfig {
            travel_cost_per_distance: self.engine.travel_cost_per_distance,
            default_max_stops: self.engine.default_max_stops,
        }
    }

    /// Validate the scenario and build the snapshot and price table.
    ///
    /// Duplicate item or location ids are errors. Quotes naming an unknown
    /// item or location are skipped with a warning.
    pub fn into_world(&self) -> Result<(WorldSnapshot, PriceTable)> {
        if self.engine.travel_cost_per_distance < 0 {
            bail!(
                "travel_cost_per_distance must not be negative (got {})",
                self.engine.travel_cost_per_distance
            );
        }

        let mut item_ids = HashSet::new();
        for item in &self.items {
            if !item_ids.insert(item.id.as_str()) {
                bail!("Duplicate item id in config: {}", item.id);
            }
        }

        let mut location_ids = HashSet::new();
        for location in &self.locations {
            if !location_ids.insert(location.id.as_str()) {
                bail!("Duplicate location id in config: {}", location.id);
            }
        }

        let mut prices = PriceTable::new();
        for entry in &self.prices {
            if !item_ids.contains(entry.item.as_str()) {
                warn!(item = %entry.item, location = %entry.location, "Quote for unknown item skipped");
                continue;
            }
            if !location_ids.contains(entry.location.as_str()) {
                warn!(item = %entry.item, location = %entry.location, "Quote for unknown location skipped");
                continue;
            }
            prices.set(entry.item.clone(), entry.location.clone(), entry.buy, entry.sell);
        }

        debug!(
            items = self.items.len(),
            locations = self.locations.len(),
            quotes = prices.len(),
            "Scenario loaded"
        );

        let world = WorldSnapshot::new(self.items.clone(), self.locations.clone(), self.player.clone());
        Ok((world, prices))
    }
}
