//! Core engine — opportunity search and route planning.

pub mod calculator;
pub mod narrative;
pub mod planner;

pub use calculator::{ArbitrageCalculator, ArbitrageConfig};
pub use planner::RoutePlanner;
