//! World collaborators.
//!
//! Everything the engine reads but does not own:
//! - `hex` — axial grid positions and the hex distance metric
//! - `prices` — the `PriceOracle` trait and an in-memory `PriceTable`
//! - `snapshot` — item catalog, location registry and player snapshot

pub mod hex;
pub mod prices;
pub mod snapshot;

pub use hex::HexCoord;
pub use prices::{PriceOracle, PriceTable, Quote};
pub use snapshot::{PlayerSnapshot, WorldSnapshot};
