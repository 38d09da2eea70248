//! Read-only risk classification map.

use crate::error::PlanError;
use crate::models::Coordinate;

/// Risk classification value of a free cell.
pub const LOW_RISK_VALUE: f64 = 0.0;

/// A `width x height` grid of risk classifications.
///
/// Cells whose value meets or exceeds `keep_out_value` are impassable.
/// Storage is dense and column-major: the cell `(e, n)` lives at
/// `e * height + n`.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskGrid {
    width: usize,
    height: usize,
    cells: Vec<f64>,
    keep_out_value: f64,
}

impl RiskGrid {
    /// Build a grid from columns, so that `risk_zones[e][n]` is the value
    /// of cell `(e, n)`.
    pub fn new(risk_zones: Vec<Vec<f64>>, keep_out_value: f64) -> Result<Self, PlanError> {
        if !keep_out_value.is_finite() || keep_out_value <= 0.0 {
            return Err(PlanError::InvalidKeepOutValue(keep_out_value));
        }
        let width = risk_zones.len();
        let height = risk_zones.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(PlanError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (e, column) in risk_zones.into_iter().enumerate() {
            if column.len() != height {
                return Err(PlanError::RaggedGrid {
                    column: e,
                    expected: height,
                    actual: column.len(),
                });
            }
            for (n, value) in column.into_iter().enumerate() {
                if value.is_nan() || value < 0.0 {
                    return Err(PlanError::InvalidRiskValue {
                        coord: Coordinate::new(e as i32, n as i32),
                        value,
                    });
                }
                cells.push(value);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            keep_out_value,
        })
    }

    /// A grid with every cell at `value`.
    pub fn filled(
        width: usize,
        height: usize,
        value: f64,
        keep_out_value: f64,
    ) -> Result<Self, PlanError> {
        Self::new(vec![vec![value; height]; width], keep_out_value)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn keep_out_value(&self) -> f64 {
        self.keep_out_value
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.e >= 0
            && coord.n >= 0
            && (coord.e as usize) < self.width
            && (coord.n as usize) < self.height
    }

    /// Risk classification of `coord`, or `None` outside the grid.
    pub fn risk(&self, coord: Coordinate) -> Option<f64> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// True for in-bounds cells at or above the keep-out threshold.
    pub fn is_keep_out(&self, coord: Coordinate) -> bool {
        self.risk(coord)
            .is_some_and(|value| value >= self.keep_out_value)
    }

    /// Overwrite one cell.
    pub fn set_risk(&mut self, coord: Coordinate, value: f64) -> Result<(), PlanError> {
        if value.is_nan() || value < 0.0 {
            return Err(PlanError::InvalidRiskValue { coord, value });
        }
        let idx = self.index(coord).ok_or(PlanError::CellOutOfBounds(coord))?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Iterate `(coord, risk)` over every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, f64)> + '_ {
        let height = self.height;
        self.cells.iter().enumerate().map(move |(idx, value)| {
            let e = (idx / height) as i32;
            let n = (idx % height) as i32;
            (Coordinate::new(e, n), *value)
        })
    }

    /// The grid as columns, the same shape [`RiskGrid::new`] accepts.
    pub fn to_columns(&self) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.height)
            .map(|column| column.to_vec())
            .collect()
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(coord.e as usize * self.height + coord.n as usize)
    }
}
