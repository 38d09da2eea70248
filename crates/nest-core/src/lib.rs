pub mod error;
pub mod grid;
pub mod models;
pub mod neighbors;
pub mod planner;
pub mod scenario;
pub mod spatial;

pub use error::PlanError;
pub use grid::RiskGrid;
pub use models::{Coordinate, DeliverySite, NestInfo};
pub use neighbors::{Connectivity, GridOracle, NeighborOracle};
pub use planner::{
    search, PathPlanner, PlanSummary, PlannedRoute, PlannerConfig, RouteOutcome, SearchContext,
    SiteReport, DEFAULT_HIGH_RISK_PENALTY,
};
pub use spatial::{euclidean_distance, is_adjacent, route_length};
