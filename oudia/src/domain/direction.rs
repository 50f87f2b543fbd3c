//! Travel direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two directions a diagram's trains are split into.
///
/// Outbound trains (`Kudari`) visit stations in railway order; inbound
/// trains (`Nobori`) visit them in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Outbound, Direction::Inbound];

    /// Array index used by per-direction fields: 0 outbound, 1 inbound.
    pub fn index(self) -> usize {
        match self {
            Direction::Outbound => 0,
            Direction::Inbound => 1,
        }
    }

    /// The on-disk name, also used as the train-list block name.
    pub fn key(self) -> &'static str {
        match self {
            Direction::Outbound => "Kudari",
            Direction::Inbound => "Nobori",
        }
    }

    /// Parse the on-disk name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Kudari" => Some(Direction::Outbound),
            "Nobori" => Some(Direction::Inbound),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Outbound => Direction::Inbound,
            Direction::Inbound => Direction::Outbound,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
