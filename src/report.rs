//! Market report — one full scan of the scenario, ready to print or
//! serialise.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::engine::planner::RoutePlanner;
use crate::types::{ArbitrageError, ArbitrageOpening, Coins, Location, TradeRoute};
use crate::world::prices::PriceOracle;

/// Everything the engine can tell the player about the market right now.
#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub generated_at: DateTime<Utc>,
    pub coins: Coins,
    pub current_location: Location,
    pub all_opportunities: Vec<ArbitrageOpening>,
    pub affordable_opportunities: Vec<ArbitrageOpening>,
    pub local_opportunities: Vec<ArbitrageOpening>,
    pub inventory_opportunities: Vec<ArbitrageOpening>,
    pub route: TradeRoute,
}

impl MarketReport {
    /// Run every query against the planner's snapshot.
    pub fn build<P: PriceOracle + ?Sized>(
        planner: &RoutePlanner<'_, P>,
        max_stops: usize,
    ) -> Result<Self, ArbitrageError> {
        let calculator = planner.calculator();
        let current_location = calculator.current_location()?.clone();
        let all_opportunities = calculator.find_all_opportunities();
        let affordable_opportunities = calculator.affordable(all_opportunities.clone());

        Ok(Self {
            generated_at: Utc::now(),
            coins: calculator.world().player().coins,
            current_location,
            all_opportunities,
            affordable_opportunities,
            local_opportunities: calculator.find_opportunities_from_current_location()?,
            inventory_opportunities: calculator.find_opportunities_for_inventory()?,
            route: planner.plan_optimal_route(max_stops)?,
        })
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, openings: &[ArbitrageOpening]) -> fmt::Result {
    writeln!(f, "{title} ({})", openings.len())?;
    if openings.is_empty() {
        return writeln!(f, "  none");
    }
    for o in openings {
        writeln!(f, "  {o}")?;
    }
    Ok(())
}

impl fmt::Display for MarketReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Market report {} | at {} | coins={}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.current_location,
            self.coins,
        )?;
        write_section(f, "Best opening per item", &self.all_opportunities)?;
        write_section(f, "Affordable", &self.affordable_opportunities)?;
        write_section(f, "From here", &self.local_opportunities)?;
        write_section(f, "For held goods", &self.inventory_opportunities)?;
        writeln!(f, "Route: {}", self.route)?;
        write!(f, "  {}", self.route.route_description)
    }
}
