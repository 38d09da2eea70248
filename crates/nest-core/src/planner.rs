//! Risk-aware A* planner for nest-to-site delivery routes.
//!
//! Two costs are tracked per cell. The true distance from the nest keeps a
//! route inside the drone's range; the penalized distance adds a surcharge
//! for every risky cell entered and decides which route wins.

use crate::error::PlanError;
use crate::models::{Coordinate, DeliverySite, NestInfo};
use crate::neighbors::{Connectivity, GridOracle, NeighborOracle};
use crate::spatial::{euclidean_distance, route_length};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::thread;

/// Weight applied per unit of risk classification. Zero turns the planner
/// into a plain shortest-path search; 13 steers well clear of high-risk cells.
pub const DEFAULT_HIGH_RISK_PENALTY: f64 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub high_risk_penalty: f64,
    pub connectivity: Connectivity,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            high_risk_penalty: DEFAULT_HIGH_RISK_PENALTY,
            connectivity: Connectivity::Eight,
        }
    }
}

/// Everything a single search needs besides the graph itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchContext {
    pub origin: Coordinate,
    pub maximum_range: f64,
    pub high_risk_penalty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    /// Nest first, delivery site last.
    pub path: Vec<Coordinate>,
    /// True Euclidean length of `path`.
    pub length: f64,
    /// `length` plus the risk surcharge of every cell entered.
    pub penalized_cost: f64,
    /// Cells entered after the nest with a non-zero risk classification.
    pub high_risk_cells: usize,
    pub nodes_visited: usize,
}

impl PlannedRoute {
    /// Share of cells entered after the nest that carry zero risk.
    pub fn low_risk_fraction(&self) -> f64 {
        let entered = self.path.len().saturating_sub(1);
        if entered == 0 {
            return 1.0;
        }
        let low = entered - self.high_risk_cells;
        low as f64 / entered as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(PlannedRoute),
    /// The frontier emptied before the destination was reached.
    Exhausted {
        nodes_visited: usize,
    },
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&PlannedRoute> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::Exhausted { .. } => None,
        }
    }

    pub fn nodes_visited(&self) -> usize {
        match self {
            RouteOutcome::Found(route) => route.nodes_visited,
            RouteOutcome::Exhausted { nodes_visited } => *nodes_visited,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteReport {
    pub destination: Coordinate,
    pub outcome: RouteOutcome,
}

/// Per-site outcomes of one planning pass, in site order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub sites: Vec<SiteReport>,
}

impl PlanSummary {
    pub fn routed(&self) -> usize {
        self.sites
            .iter()
            .filter(|report| report.outcome.is_found())
            .count()
    }

    pub fn unrouted(&self) -> usize {
        self.sites.len() - self.routed()
    }

    pub fn total_length(&self) -> f64 {
        self.sites
            .iter()
            .filter_map(|report| report.outcome.route())
            .map(|route| route.length)
            .sum()
    }
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier entry. `seq` is unique per search, so equal priorities pop in
/// insertion order.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    priority: FloatOrd,
    seq: u64,
    penalized: f64,
    coord: Coordinate,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Find the cheapest penalized route from `context.origin` to `destination`
/// whose true length stays within `context.maximum_range`.
///
/// A neighbor is admitted only while its true cost-to-reach plus the
/// straight-line distance to the destination fits the range, so the budget
/// prunes the search as it runs rather than being checked at the end. The
/// frontier is ordered by penalized cost plus the unpenalized straight-line
/// heuristic.
pub fn search<O>(oracle: &O, context: SearchContext, destination: Coordinate) -> RouteOutcome
where
    O: NeighborOracle + ?Sized,
{
    let origin = context.origin;
    let mut cost_to_reach: HashMap<Coordinate, f64> = HashMap::new();
    let mut cost_to_reach_penalized: HashMap<Coordinate, f64> = HashMap::new();
    let mut parent: HashMap<Coordinate, Option<Coordinate>> = HashMap::new();
    let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
    let mut seq = 0u64;

    cost_to_reach.insert(origin, 0.0);
    cost_to_reach_penalized.insert(origin, 0.0);
    parent.insert(origin, None);
    open_set.push(Reverse(OpenNode {
        priority: FloatOrd(euclidean_distance(origin, destination)),
        seq,
        penalized: 0.0,
        coord: origin,
    }));

    let mut nodes_visited = 0usize;
    let mut neighbors = Vec::with_capacity(8);

    while let Some(Reverse(current)) = open_set.pop() {
        let best_penalized = cost_to_reach_penalized
            .get(&current.coord)
            .copied()
            .unwrap_or(f64::INFINITY);
        // Superseded by a cheaper entry for the same cell.
        if current.penalized > best_penalized {
            continue;
        }
        let best_reach = cost_to_reach
            .get(&current.coord)
            .copied()
            .unwrap_or(f64::INFINITY);

        nodes_visited += 1;

        if current.coord == destination {
            let path = reconstruct_path(&parent, destination);
            let length = route_length(&path);
            if length <= context.maximum_range {
                let route = summarize_route(oracle, context, path, length, nodes_visited);
                tracing::debug!(
                    %origin,
                    %destination,
                    nodes_visited,
                    length = route.length,
                    "search reached destination"
                );
                return RouteOutcome::Found(route);
            }
            // A parent was re-routed after this cell was relaxed, which needs
            // negative risk somewhere upstream. Keep looking.
            tracing::debug!(%destination, length, "discarding over-range route");
            continue;
        }

        oracle.neighbors(current.coord, &mut neighbors);
        for &neighbor in &neighbors {
            let step = euclidean_distance(current.coord, neighbor);
            let candidate_reach = best_reach + step;
            let risk_penalty = oracle.risk(neighbor) * context.high_risk_penalty;
            let candidate_reach_penalized = best_penalized + step + risk_penalty;
            let cost_to_go = euclidean_distance(neighbor, destination);

            let improves = cost_to_reach_penalized
                .get(&neighbor)
                .map_or(true, |&known| candidate_reach_penalized < known);
            if !improves || candidate_reach + cost_to_go > context.maximum_range {
                continue;
            }

            cost_to_reach.insert(neighbor, candidate_reach);
            cost_to_reach_penalized.insert(neighbor, candidate_reach_penalized);
            parent.insert(neighbor, Some(current.coord));
            seq += 1;
            open_set.push(Reverse(OpenNode {
                priority: FloatOrd(candidate_reach_penalized + cost_to_go),
                seq,
                penalized: candidate_reach_penalized,
                coord: neighbor,
            }));
        }
    }

    tracing::debug!(%origin, %destination, nodes_visited, "search exhausted frontier");
    RouteOutcome::Exhausted { nodes_visited }
}

fn reconstruct_path(
    parent: &HashMap<Coordinate, Option<Coordinate>>,
    destination: Coordinate,
) -> Vec<Coordinate> {
    let mut path = vec![destination];
    let mut current = destination;
    while let Some(Some(previous)) = parent.get(&current) {
        path.push(*previous);
        current = *previous;
    }
    path.reverse();
    path
}

fn summarize_route<O>(
    oracle: &O,
    context: SearchContext,
    path: Vec<Coordinate>,
    length: f64,
    nodes_visited: usize,
) -> PlannedRoute
where
    O: NeighborOracle + ?Sized,
{
    let entered = || path.iter().skip(1).map(|&coord| oracle.risk(coord));
    let surcharge: f64 = entered().map(|risk| risk * context.high_risk_penalty).sum();
    let high_risk_cells = entered().filter(|&risk| risk > 0.0).count();
    PlannedRoute {
        path,
        length,
        penalized_cost: length + surcharge,
        high_risk_cells,
        nodes_visited,
    }
}

/// Plans routes from one nest to any number of delivery sites.
///
/// Holds only shared references and copies, so one planner can serve
/// several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner<'a> {
    nest_info: &'a NestInfo,
    config: PlannerConfig,
}

impl<'a> PathPlanner<'a> {
    pub fn new(nest_info: &'a NestInfo, config: PlannerConfig) -> Result<Self, PlanError> {
        let penalty = config.high_risk_penalty;
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(PlanError::InvalidPenalty(penalty));
        }
        Ok(Self { nest_info, config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn nest_info(&self) -> &'a NestInfo {
        self.nest_info
    }

    pub fn context(&self) -> SearchContext {
        SearchContext {
            origin: self.nest_info.nest_coord(),
            maximum_range: self.nest_info.maximum_range(),
            high_risk_penalty: self.config.high_risk_penalty,
        }
    }

    pub fn oracle(&self) -> GridOracle<'a> {
        GridOracle::with_connectivity(self.nest_info.risk_zones(), self.config.connectivity)
    }

    pub fn plan_route(&self, destination: Coordinate) -> RouteOutcome {
        self.plan_route_with(&self.oracle(), destination)
    }

    /// Like [`Self::plan_route`], over a caller-supplied graph.
    pub fn plan_route_with<O>(&self, oracle: &O, destination: Coordinate) -> RouteOutcome
    where
        O: NeighborOracle + ?Sized,
    {
        if !oracle.is_valid(destination) {
            tracing::debug!(%destination, "destination is outside the grid or in a keep-out zone");
        }
        search(oracle, self.context(), destination)
    }

    /// Plan one site and store the result in its path slot.
    ///
    /// A site with no valid route ends up with no path, even if an earlier
    /// pass gave it one.
    pub fn plan_site(&self, site: &mut DeliverySite) -> RouteOutcome {
        let outcome = self.plan_route(site.coord);
        match &outcome {
            RouteOutcome::Found(route) => {
                tracing::info!(
                    site = %site.coord,
                    length = route.length,
                    penalized_cost = route.penalized_cost,
                    high_risk_cells = route.high_risk_cells,
                    "valid path found"
                );
                site.set_path(route.path.clone());
            }
            RouteOutcome::Exhausted { nodes_visited } => {
                tracing::warn!(
                    site = %site.coord,
                    nodes_visited,
                    maximum_range = self.nest_info.maximum_range(),
                    "no valid path found under maximum range"
                );
                site.clear_path();
            }
        }
        outcome
    }

    pub fn plan_paths(&self, sites: &mut [DeliverySite]) -> PlanSummary {
        let reports = sites
            .iter_mut()
            .map(|site| SiteReport {
                destination: site.coord,
                outcome: self.plan_site(site),
            })
            .collect();
        PlanSummary { sites: reports }
    }

    /// [`Self::plan_paths`] spread over up to `workers` scoped threads.
    ///
    /// Each thread owns a disjoint chunk of `sites`; the summary keeps site
    /// order.
    pub fn plan_paths_parallel(&self, sites: &mut [DeliverySite], workers: usize) -> PlanSummary {
        let workers = workers.max(1);
        if workers == 1 || sites.len() < 2 {
            return self.plan_paths(sites);
        }
        let chunk_len = sites.len().div_ceil(workers);

        let reports: Vec<SiteReport> = thread::scope(|scope| {
            let handles: Vec<_> = sites
                .chunks_mut(chunk_len)
                .map(|chunk| scope.spawn(move || self.plan_paths(chunk).sites))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });
        PlanSummary { sites: reports }
    }
}
