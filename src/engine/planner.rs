//! Greedy multi-hop route planner.
//!
//! Walks from the player's cell one hop at a time, each time taking the
//! best opening it can pay for from wherever it currently stands.
//! Single-step lookahead only: it does not search for the globally best
//! chain.
//!
//! Capital invariant: after each hop the simulated balance changes by
//! exactly that hop's net profit (`− buy + sell − travel`).

use tracing::{debug, info};

use super::calculator::ArbitrageCalculator;
use super::narrative;
use crate::types::{ArbitrageError, ArbitrageOpening, Coins, Location, TradeRoute};
use crate::world::prices::PriceOracle;

/// Simulated position and balance during planning. Local to one call.
#[derive(Debug, Clone)]
struct RouteSimulation {
    location: Location,
    capital: Coins,
}

impl RouteSimulation {
    fn best_affordable(&self, candidates: Vec<ArbitrageOpening>) -> Option<ArbitrageOpening> {
        candidates
            .into_iter()
            .filter(|o| o.is_affordable(self.capital))
            .min_by(ArbitrageOpening::rank)
    }

    fn complete(&mut self, hop: &ArbitrageOpening) {
        self.capital += hop.net_profit;
        self.location = hop.sell_location.clone();
    }
}

/// Plans trade routes on top of an [`ArbitrageCalculator`].
pub struct RoutePlanner<'a, P: PriceOracle + ?Sized> {
    calculator: ArbitrageCalculator<'a, P>,
}

impl<'a, P: PriceOracle + ?Sized> RoutePlanner<'a, P> {
    pub fn new(calculator: ArbitrageCalculator<'a, P>) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &ArbitrageCalculator<'a, P> {
        &self.calculator
    }

    /// Plan with the configured default hop limit.
    pub fn plan_default_route(&self) -> Result<TradeRoute, ArbitrageError> {
        self.plan_optimal_route(self.calculator.config().default_max_stops)
    }

    /// Chain up to `max_stops` affordable openings starting at the player's
    /// location and coin balance. The real player is never touched.
    pub fn plan_optimal_route(&self, max_stops: usize) -> Result<TradeRoute, ArbitrageError> {
        let origin = self.calculator.current_location()?;
        let starting_capital = self.calculator.world().player().coins;

        let mut sim = RouteSimulation {
            location: origin.clone(),
            capital: starting_capital,
        };
        let mut route = TradeRoute::starting_at(origin.clone(), starting_capital);

        for stop in 0..max_stops {
            let candidates = self.calculator.find_opportunities_from(&sim.location);
            let Some(hop) = sim.best_affordable(candidates) else {
                debug!(
                    stop,
                    location = %sim.location.id,
                    capital = sim.capital,
                    "No affordable opening, route ends"
                );
                break;
            };

            debug!(
                stop,
                item = %hop.item.id,
                from = %hop.buy_location.id,
                to = %hop.sell_location.id,
                net = hop.net_profit,
                capital_before = sim.capital,
                "Hop chosen"
            );
            sim.complete(&hop);
            route.push(hop);
        }

        route.route_description = narrative::route_description(&route);

        info!(
            origin = %origin.id,
            stops = route.stops(),
            max_stops,
            total_profit = route.total_profit,
            final_capital = sim.capital,
            "Route planned"
        );

        Ok(route)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
