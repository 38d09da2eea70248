//! Built-in demonstration map and delivery-site generators.

use crate::error::PlanError;
use crate::grid::RiskGrid;
use crate::models::{Coordinate, DeliverySite, NestInfo};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const DEMO_GRID_DIM: usize = 60;
pub const DEMO_KEEP_OUT_VALUE: f64 = 2.0;
pub const DEMO_HIGH_RISK_VALUE: f64 = 1.0;
pub const DEMO_MAXIMUM_RANGE: f64 = 51.7;
pub const DEMO_NEST: Coordinate = Coordinate::new(50, 24);

const DEMO_SITES: [(i32, i32); 10] = [
    (0, 24),
    (55, 40),
    (40, 30),
    (13, 27),
    (22, 30),
    (38, 20),
    (7, 35),
    (29, 42),
    (12, 50),
    (27, 38),
];

/// 60x60 map with a keep-out disc in the middle, ringed by high risk.
pub fn demo_grid() -> Result<RiskGrid, PlanError> {
    let dim = DEMO_GRID_DIM;
    let center = (dim / 2) as i64;
    let keep_out_radius2 = dim as i64;
    let high_risk_radius2 = dim as i64 * 6;

    let columns: Vec<Vec<f64>> = (0..dim as i64)
        .map(|e| {
            (0..dim as i64)
                .map(|n| {
                    let d2 = (e - center).pow(2) + (n - center).pow(2);
                    if d2 < keep_out_radius2 {
                        DEMO_KEEP_OUT_VALUE
                    } else if d2 < high_risk_radius2 {
                        DEMO_HIGH_RISK_VALUE
                    } else {
                        0.0
                    }
                })
                .collect::<Vec<f64>>()
        })
        .collect();

    RiskGrid::new(columns, DEMO_KEEP_OUT_VALUE)
}

pub fn demo_nest_info(maximum_range: f64) -> Result<NestInfo, PlanError> {
    NestInfo::new(DEMO_NEST, demo_grid()?, maximum_range)
}

pub fn demo_sites() -> Vec<DeliverySite> {
    DEMO_SITES
        .iter()
        .map(|&coord| DeliverySite::new(coord.into()))
        .collect()
}

/// Up to `count` distinct passable sites, never on `exclude`.
///
/// The same seed always yields the same sites for the same grid.
pub fn random_sites(
    grid: &RiskGrid,
    count: usize,
    exclude: Coordinate,
    seed: u64,
) -> Vec<DeliverySite> {
    let candidates: Vec<Coordinate> = grid
        .cells()
        .filter(|&(coord, value)| coord != exclude && value < grid.keep_out_value())
        .map(|(coord, _)| coord)
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let wanted = count.min(candidates.len());
    let mut chosen = HashSet::with_capacity(wanted);
    let mut sites = Vec::with_capacity(wanted);
    while sites.len() < wanted {
        let coord = candidates[rng.random_range(0..candidates.len())];
        if chosen.insert(coord) {
            sites.push(DeliverySite::new(coord));
        }
    }
    sites
}
