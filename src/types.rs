//! Shared types for the CARAVAN engine.
//!
//! These types form the data model used across all modules.
//! Every value here is constructed fresh per query; nothing is mutated
//! after it has been handed back to a caller.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::world::hex::HexCoord;

/// Whole coins. Prices, costs and profits are all expressed in coins.
pub type Coins = i64;

pub type ItemId = String;
pub type LocationId = String;

// ---------------------------------------------------------------------------
// Item & Location
// ---------------------------------------------------------------------------

/// A tradeable good. Only used as a price lookup key by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A market location on the hex grid.
///
/// Identity is the `id`: two locations on the same cell are still two
/// different locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub position: HexCoord,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: HexCoord) -> Self {
        Self { id: id.into(), name: name.into(), position }
    }

    /// Hex distance to another location. Zero for the same location.
    pub fn distance_to(&self, other: &Location) -> i64 {
        if self == other {
            return 0;
        }
        self.position.distance_to(&other.position)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.position)
    }
}

// ---------------------------------------------------------------------------
// Arbitrage opening
// ---------------------------------------------------------------------------

/// A priced, located trade: buy `item` at `buy_location`, carry it to
/// `sell_location`, sell it there.
///
/// Derived fields always satisfy:
/// - `travel_cost = distance × cost per distance`
/// - `gross_profit = sell_price − buy_price`
/// - `net_profit = gross_profit − travel_cost`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpening {
    pub item: Item,
    pub buy_location: Location,
    pub sell_location: Location,
    pub buy_price: Coins,
    pub sell_price: Coins,
    pub distance_between_locations: i64,
    pub travel_cost: Coins,
    pub gross_profit: Coins,
    pub net_profit: Coins,
    /// Net profit per coin invested (0.0 when the buy price is 0).
    pub profit_margin: f64,
    pub profit_per_distance: f64,
    /// Coins needed up front. Zero when the good is already held.
    pub required_capital: Coins,
    pub is_currently_profitable: bool,
    pub opening_description: String,
}

impl ArbitrageOpening {
    /// Price a single buy→sell direction. The description is left empty.
    pub fn price(
        item: &Item,
        buy_location: &Location,
        sell_location: &Location,
        buy_price: Coins,
        sell_price: Coins,
        cost_per_distance: Coins,
    ) -> Self {
        let distance = buy_location.distance_to(sell_location);
        let travel_cost = distance * cost_per_distance;
        let gross_profit = sell_price - buy_price;
        let net_profit = gross_profit - travel_cost;

        Self {
            item: item.clone(),
            buy_location: buy_location.clone(),
            sell_location: sell_location.clone(),
            buy_price,
            sell_price,
            distance_between_locations: distance,
            travel_cost,
            gross_profit,
            net_profit,
            profit_margin: ratio(net_profit, buy_price),
            profit_per_distance: if distance > 0 {
                net_profit as f64 / distance as f64
            } else {
                net_profit as f64
            },
            required_capital: buy_price,
            is_currently_profitable: net_profit > 0,
            opening_description: String::new(),
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.opening_description = description;
        self
    }

    /// Mark the good as already owned: nothing needs to be spent up front.
    pub fn already_held(mut self) -> Self {
        self.required_capital = 0;
        self
    }

    /// Eligible as a candidate at all: selling beats buying.
    pub fn is_eligible(&self) -> bool {
        self.gross_profit > 0
    }

    pub fn is_affordable(&self, coins: Coins) -> bool {
        self.buy_price <= coins
    }

    /// Total order used everywhere openings are ranked; `Less` ranks first.
    ///
    /// Higher net profit, then lower required capital, then shorter
    /// distance, then item id, buy location id and sell location id.
    pub fn rank(a: &Self, b: &Self) -> Ordering {
        b.net_profit
            .cmp(&a.net_profit)
            .then_with(|| a.required_capital.cmp(&b.required_capital))
            .then_with(|| a.distance_between_locations.cmp(&b.distance_between_locations))
            .then_with(|| a.item.id.cmp(&b.item.id))
            .then_with(|| a.buy_location.id.cmp(&b.buy_location.id))
            .then_with(|| a.sell_location.id.cmp(&b.sell_location.id))
    }
}

impl fmt::Display for ArbitrageOpening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: buy {} @ {} → sell {} @ {} | dist {} | travel {} | net {} ({:.0}%)",
            self.item.name,
            self.buy_location.name,
            self.buy_price,
            self.sell_location.name,
            self.sell_price,
            self.distance_between_locations,
            self.travel_cost,
            self.net_profit,
            self.profit_margin * 100.0,
        )
    }
}

fn ratio(numerator: Coins, denominator: Coins) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

// ---------------------------------------------------------------------------
// Trade route
// ---------------------------------------------------------------------------

/// An ordered chain of openings starting at the player's location.
///
/// `location_sequence` always holds one more entry than `trades`: the
/// origin followed by each trade's sell location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    pub trades: Vec<ArbitrageOpening>,
    pub location_sequence: Vec<Location>,
    pub total_profit: Coins,
    /// Coin balance the route was simulated with.
    pub required_capital: Coins,
    pub total_distance: i64,
    pub average_profit_margin: f64,
    pub route_description: String,
}

impl TradeRoute {
    /// An empty route sitting at `origin`.
    pub fn starting_at(origin: Location, capital: Coins) -> Self {
        Self {
            trades: Vec::new(),
            location_sequence: vec![origin],
            total_profit: 0,
            required_capital: capital,
            total_distance: 0,
            average_profit_margin: 0.0,
            route_description: String::new(),
        }
    }

    /// Append a hop and keep the aggregates in step.
    pub fn push(&mut self, trade: ArbitrageOpening) {
        self.location_sequence.push(trade.sell_location.clone());
        self.total_profit += trade.net_profit;
        self.total_distance += trade.distance_between_locations;
        self.trades.push(trade);
        self.average_profit_margin =
            self.trades.iter().map(|t| t.profit_margin).sum::<f64>() / self.trades.len() as f64;
    }

    pub fn origin(&self) -> &Location {
        &self.location_sequence[0]
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn stops(&self) -> usize {
        self.trades.len()
    }
}

impl fmt::Display for TradeRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<&str> = self.location_sequence.iter().map(|l| l.name.as_str()).collect();
        write!(
            f,
            "{} | stops={} | distance={} | profit={} | avg margin={:.1}%",
            path.join(" → "),
            self.stops(),
            self.total_distance,
            self.total_profit,
            self.average_profit_margin * 100.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Malformed calls into the engine. Missing opportunities are never
/// errors; they are empty results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArbitrageError {
    #[error("Player has no current location (no location occupies cell {position})")]
    NoCurrentLocation { position: HexCoord },

    #[error("Item not found in catalog: {0}")]
    UnknownItem(ItemId),

    #[error("Location not found: {0}")]
    UnknownLocation(LocationId),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
