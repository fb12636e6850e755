//! Cell states for the occupancy grid.

use serde::{Deserialize, Serialize};

/// Occupancy of a single grid cell.
///
/// The guidance grid is binary: a cell is either walkable corridor or it
/// is not. Walls from the static map and hazards injected for the current
/// cycle both end up as `Blocked`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Walkable corridor
    #[default]
    Free = 0,

    /// Wall, shop, or hazard zone
    Blocked = 1,
}

impl CellState {
    /// Can an occupant walk through this cell?
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, CellState::Free)
    }

    /// Is this cell blocked?
    #[inline]
    pub fn is_blocked(self) -> bool {
        matches!(self, CellState::Blocked)
    }

    /// Convert from u8 (storage representation)
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => CellState::Free,
            _ => CellState::Blocked,
        }
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Blocked => '#',
        }
    }
}
