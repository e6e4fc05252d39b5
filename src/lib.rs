//! CARAVAN — market arbitrage and trade-route planning engine
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod world;
pub mod engine;
pub mod report;
