//! Errors raised when planning inputs are malformed.
//!
//! A destination that cannot be reached is not an error; see
//! [`crate::planner::RouteOutcome::Exhausted`].

use crate::models::Coordinate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("risk grid is empty")]
    EmptyGrid,

    #[error("risk grid column {column} has {actual} cells, expected {expected}")]
    RaggedGrid {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("risk value {value} at {coord} is negative or NaN")]
    InvalidRiskValue { coord: Coordinate, value: f64 },

    #[error("keep-out value must be finite and positive, got {0}")]
    InvalidKeepOutValue(f64),

    #[error("maximum range must be finite and positive, got {0}")]
    InvalidMaximumRange(f64),

    #[error("cell {0} lies outside the risk grid")]
    CellOutOfBounds(Coordinate),

    #[error("nest {0} lies outside the risk grid")]
    NestOutOfBounds(Coordinate),

    #[error("nest {0} lies inside a keep-out zone")]
    NestInKeepOut(Coordinate),

    #[error("high risk penalty must be finite and non-negative, got {0}")]
    InvalidPenalty(f64),
}
