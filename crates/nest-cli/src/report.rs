//! Human- and machine-readable output for a planning pass.

use anyhow::{Context, Result};
use nest_core::{Coordinate, DeliverySite, PlanSummary, RiskGrid, RouteOutcome, SiteReport};
use std::collections::HashSet;
use std::fmt::Write as _;

pub fn format_site_line(report: &SiteReport) -> String {
    match &report.outcome {
        RouteOutcome::Found(route) => format!(
            "site {}: {} cells, length {:.2}, penalized {:.2}, {} high-risk, {} nodes",
            report.destination,
            route.path.len(),
            route.length,
            route.penalized_cost,
            route.high_risk_cells,
            route.nodes_visited
        ),
        RouteOutcome::Exhausted { nodes_visited } => format!(
            "site {}: no valid path found under maximum range ({} nodes)",
            report.destination, nodes_visited
        ),
    }
}

pub fn format_summary(summary: &PlanSummary) -> String {
    let mut out = String::new();
    for report in &summary.sites {
        let _ = writeln!(out, "{}", format_site_line(report));
    }
    let _ = writeln!(
        out,
        "routed {}/{} sites, total length {:.2}",
        summary.routed(),
        summary.sites.len(),
        summary.total_length()
    );
    out
}

pub fn to_json(summary: &PlanSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize plan summary")
}

/// Draw the map with north at the top.
///
/// `N` nest, `S` site, `*` route, `#` keep-out, `+` risky, `.` free.
pub fn render_map(grid: &RiskGrid, nest: Coordinate, sites: &[DeliverySite]) -> String {
    let site_cells: HashSet<Coordinate> = sites.iter().map(|site| site.coord).collect();
    let route_cells: HashSet<Coordinate> = sites
        .iter()
        .filter_map(DeliverySite::path)
        .flatten()
        .copied()
        .collect();

    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for n in (0..grid.height() as i32).rev() {
        for e in 0..grid.width() as i32 {
            let coord = Coordinate::new(e, n);
            let glyph = if coord == nest {
                'N'
            } else if site_cells.contains(&coord) {
                'S'
            } else if route_cells.contains(&coord) {
                '*'
            } else if grid.is_keep_out(coord) {
                '#'
            } else if grid.risk(coord).is_some_and(|value| value > 0.0) {
                '+'
            } else {
                '.'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_core::{NestInfo, PathPlanner, PlannerConfig};

    fn planned() -> (NestInfo, Vec<DeliverySite>, PlanSummary) {
        let mut grid = RiskGrid::filled(4, 3, 0.0, 2.0).unwrap();
        grid.set_risk(Coordinate::new(1, 2), 2.0).unwrap();
        grid.set_risk(Coordinate::new(2, 2), 1.0).unwrap();
        let nest = NestInfo::new(Coordinate::new(0, 0), grid, 10.0).unwrap();
        let mut sites = vec![
            DeliverySite::new(Coordinate::new(3, 0)),
            DeliverySite::new(Coordinate::new(1, 2)),
        ];
        let summary = PathPlanner::new(&nest, PlannerConfig::default())
            .unwrap()
            .plan_paths(&mut sites);
        (nest, sites, summary)
    }

    #[test]
    fn summary_lists_every_site() {
        let (_, _, summary) = planned();
        let text = format_summary(&summary);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "site (3, 0): 4 cells, length 3.00, penalized 3.00, 0 high-risk, 4 nodes"
        );
        assert!(lines[1].starts_with("site (1, 2): no valid path found"));
        assert_eq!(lines[2], "routed 1/2 sites, total length 3.00");
    }

    #[test]
    fn map_marks_nest_sites_route_and_zones() {
        let (nest, sites, _) = planned();
        let map = render_map(nest.risk_zones(), nest.nest_coord(), &sites);
        assert_eq!(map, ".S+.\n....\nN**S\n");
    }

    #[test]
    fn json_reports_status_tags() {
        let (_, _, summary) = planned();
        let value: serde_json::Value = serde_json::from_str(&to_json(&summary).unwrap()).unwrap();
        assert_eq!(value["sites"][0]["outcome"]["status"], "found");
        assert_eq!(value["sites"][1]["outcome"]["status"], "exhausted");
    }
}
