//! Plan delivery routes from the nest to every site in a scenario.
//!
//! Without `--scenario` the built-in demonstration map is used.

use anyhow::{Context, Result};
use clap::Parser;
use nest_cli::{init_tracing, report, Config, ScenarioFile};
use nest_core::scenario::random_sites;
use nest_core::{Connectivity, PathPlanner};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario JSON file (default: built-in demo map)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Penalty per unit of risk (overrides NEST_HIGH_RISK_PENALTY and the scenario)
    #[arg(long)]
    penalty: Option<f64>,

    /// Maximum route length in cells (overrides NEST_MAX_RANGE and the scenario)
    #[arg(long)]
    max_range: Option<f64>,

    /// Replace the scenario's sites with this many random ones
    #[arg(long)]
    random_sites: Option<usize>,

    /// Seed for --random-sites
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Only allow axis-aligned moves
    #[arg(long)]
    four_connected: bool,

    /// Plan sites on NEST_WORKERS threads
    #[arg(long)]
    parallel: bool,

    /// Print the plan summary as JSON
    #[arg(long)]
    json: bool,

    /// Draw the map with the planned routes
    #[arg(long)]
    map: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = Config::from_env();

    let mut scenario = match &args.scenario {
        Some(path) => ScenarioFile::load(path)?,
        None => ScenarioFile::demo().context("failed to build demo scenario")?,
    };
    if let Some(range) = args.max_range.or(config.maximum_range) {
        scenario.maximum_range = range;
    }

    let mut planner_config = scenario.planner;
    if let Some(penalty) = args.penalty.or(config.high_risk_penalty) {
        planner_config.high_risk_penalty = penalty;
    }
    if args.four_connected {
        planner_config.connectivity = Connectivity::Four;
    }

    let (nest_info, mut sites) = scenario.into_parts().context("invalid scenario")?;
    if let Some(count) = args.random_sites {
        sites = random_sites(
            nest_info.risk_zones(),
            count,
            nest_info.nest_coord(),
            args.seed,
        );
    }

    let planner = PathPlanner::new(&nest_info, planner_config)?;
    tracing::info!(
        sites = sites.len(),
        nest = %nest_info.nest_coord(),
        maximum_range = nest_info.maximum_range(),
        high_risk_penalty = planner_config.high_risk_penalty,
        "planning delivery routes"
    );

    let summary = if args.parallel {
        planner.plan_paths_parallel(&mut sites, config.workers)
    } else {
        planner.plan_paths(&mut sites)
    };

    if args.json {
        println!("{}", report::to_json(&summary)?);
    } else {
        print!("{}", report::format_summary(&summary));
    }
    if args.map {
        print!(
            "{}",
            report::render_map(nest_info.risk_zones(), nest_info.nest_coord(), &sites)
        );
    }

    Ok(())
}
