//! Integration tests for the CARAVAN engine.
//!
//! Every scenario is built in memory through `mock_market::MarketFixture`
//! and queried through the public library API only.


mod opportunities;
