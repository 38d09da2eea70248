//! Neighbor enumeration over the implicit grid graph.

use crate::grid::RiskGrid;
use crate::models::Coordinate;
use serde::{Deserialize, Serialize};

/// The search's view of the graph: which cells exist, which are adjacent,
/// and how risky each one is.
pub trait NeighborOracle {
    /// True when `coord` may appear on a route.
    fn is_valid(&self, coord: Coordinate) -> bool;

    /// Replace the contents of `buf` with the valid neighbors of `coord`.
    fn neighbors(&self, coord: Coordinate, buf: &mut Vec<Coordinate>);

    /// Risk classification of a cell already accepted by [`Self::is_valid`].
    ///
    /// Expected to be non-negative. With negative risk a settled cell can be
    /// re-routed later, and [`crate::planner::search`] may have to discard
    /// over-range routes at the destination.
    fn risk(&self, coord: Coordinate) -> f64;
}

/// Which offsets count as adjacent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Axis-aligned and diagonal moves.
    #[default]
    Eight,
    /// Axis-aligned moves only.
    Four,
}

const EIGHT_CONNECTED: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, 0),
    (-1, -1),
    (-1, 1),
];

const FOUR_CONNECTED: [(i32, i32); 4] = [(1, 0), (0, -1), (0, 1), (-1, 0)];

impl Connectivity {
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Eight => &EIGHT_CONNECTED,
            Connectivity::Four => &FOUR_CONNECTED,
        }
    }
}

/// [`NeighborOracle`] backed by a [`RiskGrid`]: a cell is valid when it is
/// inside the grid and strictly below the keep-out threshold.
#[derive(Debug, Clone, Copy)]
pub struct GridOracle<'a> {
    grid: &'a RiskGrid,
    connectivity: Connectivity,
}

impl<'a> GridOracle<'a> {
    pub fn new(grid: &'a RiskGrid) -> Self {
        Self::with_connectivity(grid, Connectivity::default())
    }

    pub fn with_connectivity(grid: &'a RiskGrid, connectivity: Connectivity) -> Self {
        Self { grid, connectivity }
    }

    pub fn grid(&self) -> &'a RiskGrid {
        self.grid
    }
}

impl NeighborOracle for GridOracle<'_> {
    fn is_valid(&self, coord: Coordinate) -> bool {
        // Bounds are checked inside `risk` before any lookup.
        match self.grid.risk(coord) {
            Some(value) => value < self.grid.keep_out_value(),
            None => false,
        }
    }

    fn neighbors(&self, coord: Coordinate, buf: &mut Vec<Coordinate>) {
        buf.clear();
        for &(de, dn) in self.connectivity.offsets() {
            let candidate = coord.offset(de, dn);
            if self.is_valid(candidate) {
                buf.push(candidate);
            }
        }
    }

    fn risk(&self, coord: Coordinate) -> f64 {
        self.grid.risk(coord).unwrap_or(0.0)
    }
}
