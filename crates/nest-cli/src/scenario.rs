//! JSON scenario files: a risk map, a nest, a range and delivery sites.

use anyhow::{Context, Result};
use nest_core::scenario::{demo_grid, demo_sites, DEMO_MAXIMUM_RANGE, DEMO_NEST};
use nest_core::{Coordinate, DeliverySite, NestInfo, PlanError, PlannerConfig, RiskGrid};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub keep_out_value: f64,
    pub maximum_range: f64,
    pub nest: Coordinate,
    /// Indexed `[e][n]`.
    pub risk_zones: Vec<Vec<f64>>,
    #[serde(default)]
    pub sites: Vec<Coordinate>,
    #[serde(default)]
    pub planner: PlannerConfig,
}

impl ScenarioFile {
    /// The built-in 60x60 demonstration map with its ten sites.
    pub fn demo() -> Result<Self, PlanError> {
        let grid = demo_grid()?;
        Ok(Self {
            keep_out_value: grid.keep_out_value(),
            maximum_range: DEMO_MAXIMUM_RANGE,
            nest: DEMO_NEST,
            risk_zones: grid.to_columns(),
            sites: demo_sites().into_iter().map(|site| site.coord).collect(),
            planner: PlannerConfig::default(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write scenario {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize scenario")
    }

    /// Validate the map and nest, and turn the site list into fresh,
    /// unplanned delivery sites.
    pub fn into_parts(self) -> Result<(NestInfo, Vec<DeliverySite>), PlanError> {
        let grid = RiskGrid::new(self.risk_zones, self.keep_out_value)?;
        let nest_info = NestInfo::new(self.nest, grid, self.maximum_range)?;
        let sites = self.sites.into_iter().map(DeliverySite::new).collect();
        Ok((nest_info, sites))
    }
}
