//! Axial hex-grid coordinates.
//!
//! Locations sit on cells of an axial `(q, r)` grid. Distance is the
//! standard hex metric: `(|Δq| + |Δr| + |Δq + Δr|) / 2`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the world's hex grid in axial coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Number of steps between two cells.
    pub fn distance_to(&self, other: &HexCoord) -> i64 {
        let dq = (self.q as i64) - (other.q as i64);
        let dr = (self.r as i64) - (other.r as i64);
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }
}

impl From<[i32; 2]> for HexCoord {
    fn from([q, r]: [i32; 2]) -> Self {
        Self { q, r }
    }
}

impl From<HexCoord> for [i32; 2] {
    fn from(c: HexCoord) -> Self {
        [c.q, c.r]
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
