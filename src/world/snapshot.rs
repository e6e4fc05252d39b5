//! Immutable world snapshot consumed by every engine query.
//!
//! Holds the item catalog, the location registry (with hex-cell
//! occupancy) and the player's coins, position and held goods. Queries
//! borrow the snapshot; nothing in the engine can write back to it.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{Coins, Item, ItemId, Location};
use crate::world::hex::HexCoord;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The player as seen by the engine at query time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub coins: Coins,
    pub position: HexCoord,
    /// Held quantity per item id.
    #[serde(default)]
    pub inventory: BTreeMap<ItemId, u32>,
}

impl PlayerSnapshot {
    pub fn new(coins: Coins, position: HexCoord) -> Self {
        Self { coins, position, inventory: BTreeMap::new() }
    }

    pub fn holding(mut self, item_id: impl Into<ItemId>, quantity: u32) -> Self {
        self.inventory.insert(item_id.into(), quantity);
        self
    }

    pub fn held_quantity(&self, item_id: &str) -> u32 {
        self.inventory.get(item_id).copied().unwrap_or(0)
    }

    /// Ids of goods actually held (quantity > 0), in id order.
    pub fn held_item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.inventory
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(id, _)| id)
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Read-only snapshot of catalog, locations and player.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    items: Vec<Item>,
    locations: Vec<Location>,
    /// Which location (index into `locations`) occupies each cell.
    occupancy: HashMap<HexCoord, usize>,
    player: PlayerSnapshot,
}

impl WorldSnapshot {
    /// Build a snapshot. The first location registered on a cell occupies
    /// it; later ones on the same cell stay tradeable but cannot be
    /// resolved from a grid position.
    pub fn new(items: Vec<Item>, locations: Vec<Location>, player: PlayerSnapshot) -> Self {
        let mut occupancy = HashMap::with_capacity(locations.len());
        for (idx, location) in locations.iter().enumerate() {
            if let Some(&existing) = occupancy.get(&location.position) {
                let holder: &Location = &locations[existing];
                warn!(
                    cell = %location.position,
                    occupant = %holder.id,
                    location = %location.id,
                    "Cell already occupied; location not resolvable by position"
                );
                continue;
            }
            occupancy.insert(location.position, idx);
        }

        Self { items, locations, occupancy, player }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn player(&self) -> &PlayerSnapshot {
        &self.player
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// The location occupying a grid cell, if any.
    pub fn location_at(&self, position: &HexCoord) -> Option<&Location> {
        self.occupancy.get(position).map(|&idx| &self.locations[idx])
    }

    /// The location at the player's current cell.
    pub fn current_location(&self) -> Option<&Location> {
        self.location_at(&self.player.position)
    }

    /// A copy of this snapshot with a different player.
    pub fn with_player(&self, player: PlayerSnapshot) -> Self {
        Self {
            items: self.items.clone(),
            locations: self.locations.clone(),
            occupancy: self.occupancy.clone(),
            player,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
