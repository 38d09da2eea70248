//! Core data models for nest-based delivery planning.

use crate::error::PlanError;
use crate::grid::RiskGrid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A grid cell, addressed by east-index and north-index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub e: i32,
    pub n: i32,
}

impl Coordinate {
    pub const fn new(e: i32, n: i32) -> Self {
        Self { e, n }
    }

    /// Cell displaced by `(de, dn)`.
    pub const fn offset(self, de: i32, dn: i32) -> Self {
        Self {
            e: self.e + de,
            n: self.n + dn,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.e, self.n)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((e, n): (i32, i32)) -> Self {
        Self { e, n }
    }
}

/// Nest location, the risk map around it, and the drone's range budget.
///
/// Validated on construction and immutable afterwards, so a planning pass
/// can share it across destinations (and threads) by reference.
#[derive(Debug, Clone)]
pub struct NestInfo {
    nest_coord: Coordinate,
    risk_zones: RiskGrid,
    maximum_range: f64,
}

impl NestInfo {
    pub fn new(
        nest_coord: Coordinate,
        risk_zones: RiskGrid,
        maximum_range: f64,
    ) -> Result<Self, PlanError> {
        if !maximum_range.is_finite() || maximum_range <= 0.0 {
            return Err(PlanError::InvalidMaximumRange(maximum_range));
        }
        if !risk_zones.in_bounds(nest_coord) {
            return Err(PlanError::NestOutOfBounds(nest_coord));
        }
        if risk_zones.is_keep_out(nest_coord) {
            return Err(PlanError::NestInKeepOut(nest_coord));
        }
        Ok(Self {
            nest_coord,
            risk_zones,
            maximum_range,
        })
    }

    pub fn nest_coord(&self) -> Coordinate {
        self.nest_coord
    }

    pub fn risk_zones(&self) -> &RiskGrid {
        &self.risk_zones
    }

    pub fn maximum_range(&self) -> f64 {
        self.maximum_range
    }
}

/// A delivery destination and, once planned, the route that serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySite {
    pub coord: Coordinate,
    /// Route from the nest to `coord`, both endpoints included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Coordinate>>,
}

impl DeliverySite {
    pub fn new(coord: Coordinate) -> Self {
        Self { coord, path: None }
    }

    pub fn set_path(&mut self, path: Vec<Coordinate>) {
        self.path = Some(path);
    }

    pub fn clear_path(&mut self) {
        self.path = None;
    }

    pub fn path(&self) -> Option<&[Coordinate]> {
        self.path.as_deref()
    }
}
