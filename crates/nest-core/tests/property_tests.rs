//! Property-based tests for the route planner.
//!
//! # Invariants tested
//!
//! - **Route validity:** routes start at the nest, end at the site, move one
//!   grid step at a time and never touch a keep-out cell.
//! - **Range respect:** the true route length never exceeds the range.
//! - **Determinism:** planning the same input twice gives the same outcome.
//! - **Keep-out destinations:** are never reached.

use nest_core::{
    is_adjacent, route_length, Coordinate, NestInfo, PathPlanner, PlannerConfig, RiskGrid,
};
use proptest::prelude::*;

const KEEP_OUT: f64 = 2.0;

#[derive(Debug, Clone)]
struct Case {
    width: usize,
    height: usize,
    cells: Vec<f64>,
    destination: Coordinate,
    maximum_range: f64,
    penalty: f64,
}

impl Case {
    fn nest_info(&self) -> NestInfo {
        let mut columns: Vec<Vec<f64>> = self
            .cells
            .chunks(self.height)
            .map(|column| column.to_vec())
            .collect();
        assert_eq!(columns.len(), self.width);
        // The nest itself must be passable.
        columns[0][0] = 0.0;
        let grid = RiskGrid::new(columns, KEEP_OUT).unwrap();
        NestInfo::new(Coordinate::new(0, 0), grid, self.maximum_range).unwrap()
    }

    fn config(&self) -> PlannerConfig {
        PlannerConfig {
            high_risk_penalty: self.penalty,
            ..PlannerConfig::default()
        }
    }
}

fn cell_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        6 => Just(0.0),
        3 => Just(1.0),
        1 => Just(0.5),
        2 => Just(KEEP_OUT),
    ]
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (2usize..10, 2usize..10).prop_flat_map(|(width, height)| {
        (
            prop::collection::vec(cell_strategy(), width * height),
            0..width as i32,
            0..height as i32,
            1.0f64..25.0,
            0.0f64..20.0,
        )
            .prop_map(move |(cells, e, n, maximum_range, penalty)| Case {
                width,
                height,
                cells,
                destination: Coordinate::new(e, n),
                maximum_range,
                penalty,
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: any route produced is a valid, in-range walk over passable cells.
    #[test]
    fn routes_are_valid_and_within_range(case in case_strategy()) {
        let nest = case.nest_info();
        let planner = PathPlanner::new(&nest, case.config()).unwrap();
        let outcome = planner.plan_route(case.destination);

        if let Some(route) = outcome.route() {
            prop_assert_eq!(route.path.first(), Some(&nest.nest_coord()));
            prop_assert_eq!(route.path.last(), Some(&case.destination));
            for pair in route.path.windows(2) {
                prop_assert!(is_adjacent(pair[0], pair[1]));
            }
            for coord in &route.path {
                prop_assert!(!nest.risk_zones().is_keep_out(*coord));
            }
            let length = route_length(&route.path);
            prop_assert!(
                length <= case.maximum_range + 1e-9,
                "route length {} exceeds range {}",
                length,
                case.maximum_range
            );
            prop_assert!(route.length <= route.penalized_cost + 1e-9);
        }
    }

    /// Property: planning is a pure function of its inputs.
    #[test]
    fn planning_is_deterministic(case in case_strategy()) {
        let nest = case.nest_info();
        let planner = PathPlanner::new(&nest, case.config()).unwrap();
        let first = planner.plan_route(case.destination);
        let second = planner.plan_route(case.destination);
        prop_assert_eq!(first, second);
    }

    /// Property: a keep-out destination is never reached.
    #[test]
    fn keep_out_destination_is_unreachable(mut case in case_strategy()) {
        if case.destination == Coordinate::new(0, 0) {
            return Ok(());
        }
        let idx = case.destination.e as usize * case.height + case.destination.n as usize;
        case.cells[idx] = KEEP_OUT;
        let nest = case.nest_info();
        let planner = PathPlanner::new(&nest, case.config()).unwrap();
        prop_assert!(!planner.plan_route(case.destination).is_found());
    }
}
