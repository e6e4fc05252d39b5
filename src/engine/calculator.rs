//! Arbitrage calculator.
//!
//! Prices single buy→sell pairs and searches the market for the
//! openings worth taking: best per item, market-wide, affordable,
//! from the player's cell, and for goods the player already holds.

use tracing::{debug, info};

use super::narrative;
use crate::types::{ArbitrageError, ArbitrageOpening, Coins, Item, Location};
use crate::world::prices::PriceOracle;
use crate::world::snapshot::WorldSnapshot;

// ---------------------------------------------------------------------------
// Configuration (defaults — overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbitrageConfig {
    /// Coins charged per hex of travel between buy and sell location.
    pub travel_cost_per_distance: Coins,
    /// Hop limit used by `RoutePlanner::plan_default_route`.
    pub default_max_stops: usize,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            travel_cost_per_distance: 2,
            default_max_stops: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Read-only arbitrage queries over one world snapshot and price oracle.
pub struct ArbitrageCalculator<'a, P: PriceOracle + ?Sized> {
    world: &'a WorldSnapshot,
    prices: &'a P,
    config: ArbitrageConfig,
}

impl<'a, P: PriceOracle + ?Sized> Clone for ArbitrageCalculator<'a, P> {
    fn clone(&self) -> Self {
        Self {
            world: self.world,
            prices: self.prices,
            config: self.config,
        }
    }
}

impl<'a, P: PriceOracle + ?Sized> ArbitrageCalculator<'a, P> {
    pub fn new(world: &'a WorldSnapshot, prices: &'a P, config: ArbitrageConfig) -> Self {
        Self { world, prices, config }
    }

    /// Calculator with default tuning (2 coins per hex).
    pub fn with_defaults(world: &'a WorldSnapshot, prices: &'a P) -> Self {
        Self::new(world, prices, ArbitrageConfig::default())
    }

    pub fn world(&self) -> &'a WorldSnapshot {
        self.world
    }

    pub fn config(&self) -> &ArbitrageConfig {
        &self.config
    }

    pub fn travel_cost(&self, distance: i64) -> Coins {
        distance * self.config.travel_cost_per_distance
    }

    // -- Profit evaluation ---------------------------------------------------

    /// Raw single-direction profit: sell price at `sell_location` minus buy
    /// price at `buy_location` minus travel cost.
    ///
    /// Same-location evaluation is allowed (zero travel). Returns `None`
    /// when either location is missing or either price is unavailable.
    pub fn calculate_profit(
        &self,
        item: &Item,
        buy_location: Option<&Location>,
        sell_location: Option<&Location>,
    ) -> Option<Coins> {
        let buy_location = buy_location?;
        let sell_location = sell_location?;
        let buy_price = self.prices.buy_price(item, buy_location)?;
        let sell_price = self.prices.sell_price(item, sell_location)?;

        let travel_cost = self.travel_cost(buy_location.distance_to(sell_location));
        Some(sell_price - buy_price - travel_cost)
    }

    /// Price one direction, if both quotes exist. No eligibility check.
    fn price_direction(&self, item: &Item, buy: &Location, sell: &Location) -> Option<ArbitrageOpening> {
        let buy_price = self.prices.buy_price(item, buy)?;
        let sell_price = self.prices.sell_price(item, sell)?;
        Some(ArbitrageOpening::price(
            item,
            buy,
            sell,
            buy_price,
            sell_price,
            self.config.travel_cost_per_distance,
        ))
    }

    fn describe(opening: ArbitrageOpening) -> ArbitrageOpening {
        let description = narrative::opening_description(
            &opening.item.name,
            &opening.buy_location.name,
            &opening.sell_location.name,
            opening.net_profit,
        );
        opening.with_description(description)
    }

    // -- Opportunity search --------------------------------------------------

    /// Best opening for one item across every pair of distinct locations,
    /// both directions per pair.
    ///
    /// Only candidates that still make money after travel qualify; the
    /// winner is the best by [`ArbitrageOpening::rank`].
    pub fn find_best_opening(&self, item: &Item) -> Option<ArbitrageOpening> {
        let locations = self.world.locations();
        let mut best: Option<ArbitrageOpening> = None;

        for (i, a) in locations.iter().enumerate() {
            for b in &locations[i + 1..] {
                if a == b {
                    continue;
                }
                for (buy, sell) in [(a, b), (b, a)] {
                    let Some(candidate) = self.price_direction(item, buy, sell) else {
                        continue;
                    };
                    if !candidate.is_eligible() || !candidate.is_currently_profitable {
                        continue;
                    }
                    let better = best
                        .as_ref()
                        .map_or(true, |current| ArbitrageOpening::rank(&candidate, current).is_lt());
                    if better {
                        best = Some(candidate);
                    }
                }
            }
        }

        best.map(Self::describe)
    }

    /// Best opening for an item looked up by id.
    pub fn opening_for_item(&self, item_id: &str) -> Result<Option<ArbitrageOpening>, ArbitrageError> {
        let item = self
            .world
            .item(item_id)
            .ok_or_else(|| ArbitrageError::UnknownItem(item_id.to_string()))?;
        Ok(self.find_best_opening(item))
    }

    /// Best profitable opening per catalog item, best first.
    pub fn find_all_opportunities(&self) -> Vec<ArbitrageOpening> {
        let mut opportunities: Vec<ArbitrageOpening> = self
            .world
            .items()
            .iter()
            .filter_map(|item| self.find_best_opening(item))
            .filter(|o| o.net_profit > 0)
            .collect();

        opportunities.sort_by(ArbitrageOpening::rank);

        info!(
            items = self.world.items().len(),
            locations = self.world.locations().len(),
            found = opportunities.len(),
            "Market-wide scan complete"
        );

        opportunities
    }

    /// Market-wide openings whose buy price the player can pay outright.
    pub fn find_affordable_opportunities(&self) -> Vec<ArbitrageOpening> {
        self.affordable(self.find_all_opportunities())
    }

    /// Keep the openings the player's coins cover. Order is preserved.
    pub fn affordable(&self, openings: Vec<ArbitrageOpening>) -> Vec<ArbitrageOpening> {
        let coins = self.world.player().coins;
        let affordable: Vec<ArbitrageOpening> = openings
            .into_iter()
            .filter(|o| o.is_affordable(coins))
            .collect();

        debug!(coins, affordable = affordable.len(), "Affordability filter applied");
        affordable
    }

    /// The location at the player's cell.
    pub fn current_location(&self) -> Result<&'a Location, ArbitrageError> {
        let world = self.world;
        world
            .current_location()
            .ok_or(ArbitrageError::NoCurrentLocation {
                position: world.player().position,
            })
    }

    /// Openings that buy at `origin` and sell at any other location, best
    /// first. Not filtered by wealth.
    pub fn find_opportunities_from(&self, origin: &Location) -> Vec<ArbitrageOpening> {
        let mut opportunities = Vec::new();

        for item in self.world.items() {
            if self.prices.buy_price(item, origin).is_none() {
                continue;
            }
            for sell in self.world.locations() {
                if sell == origin {
                    continue;
                }
                let Some(opening) = self.price_direction(item, origin, sell) else {
                    continue;
                };
                if !opening.is_eligible() || opening.net_profit <= 0 {
                    continue;
                }
                debug!(
                    item = %item.id,
                    from = %origin.id,
                    to = %sell.id,
                    net = opening.net_profit,
                    "Opening found"
                );
                opportunities.push(Self::describe(opening));
            }
        }

        opportunities.sort_by(ArbitrageOpening::rank);
        opportunities
    }

    /// Openings that buy at the location with the given id.
    pub fn opportunities_from_location(&self, location_id: &str) -> Result<Vec<ArbitrageOpening>, ArbitrageError> {
        let origin = self
            .world
            .location(location_id)
            .ok_or_else(|| ArbitrageError::UnknownLocation(location_id.to_string()))?;
        Ok(self.find_opportunities_from(origin))
    }

    /// Openings that buy where the player stands.
    pub fn find_opportunities_from_current_location(&self) -> Result<Vec<ArbitrageOpening>, ArbitrageError> {
        let origin = self.current_location()?;
        let opportunities = self.find_opportunities_from(origin);
        info!(
            origin = %origin.id,
            found = opportunities.len(),
            "Local scan complete"
        );
        Ok(opportunities)
    }

    /// Where goods already held sell for more than they do here, net of
    /// travel. The current location stands in as the buy side and no
    /// capital is required.
    pub fn find_opportunities_for_inventory(&self) -> Result<Vec<ArbitrageOpening>, ArbitrageError> {
        let origin = self.current_location()?;
        let mut opportunities = Vec::new();

        for item_id in self.world.player().held_item_ids() {
            let item = self
                .world
                .item(item_id)
                .ok_or_else(|| ArbitrageError::UnknownItem(item_id.clone()))?;

            let Some(here) = self.prices.sell_price(item, origin) else {
                debug!(item = %item.id, origin = %origin.id, "Held item not sellable here, skipped");
                continue;
            };

            for dest in self.world.locations() {
                if dest == origin {
                    continue;
                }
                let Some(there) = self.prices.sell_price(item, dest) else {
                    continue;
                };
                let opening = ArbitrageOpening::price(
                    item,
                    origin,
                    dest,
                    here,
                    there,
                    self.config.travel_cost_per_distance,
                )
                .already_held();
                if opening.net_profit <= 0 {
                    continue;
                }
                let description = narrative::inventory_description(&item.name, &dest.name, opening.net_profit);
                opportunities.push(opening.with_description(description));
            }
        }

        opportunities.sort_by(ArbitrageOpening::rank);
        info!(
            origin = %origin.id,
            found = opportunities.len(),
            "Inventory scan complete"
        );
        Ok(opportunities)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
