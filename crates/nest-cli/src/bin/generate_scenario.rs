//! Write a scenario file based on the demonstration map.

use anyhow::{Context, Result};
use clap::Parser;
use nest_cli::{init_tracing, ScenarioFile};
use nest_core::scenario::random_sites;
use nest_core::RiskGrid;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Replace the demo sites with this many random ones
    #[arg(long)]
    random_sites: Option<usize>,

    /// Seed for --random-sites
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum route length written to the file
    #[arg(long)]
    max_range: Option<f64>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut scenario = ScenarioFile::demo().context("failed to build demo scenario")?;
    if let Some(range) = args.max_range {
        scenario.maximum_range = range;
    }
    if let Some(count) = args.random_sites {
        let grid = RiskGrid::new(scenario.risk_zones.clone(), scenario.keep_out_value)?;
        scenario.sites = random_sites(&grid, count, scenario.nest, args.seed)
            .into_iter()
            .map(|site| site.coord)
            .collect();
    }

    match &args.output {
        Some(path) => {
            scenario.save(path)?;
            tracing::info!(path = %path.display(), sites = scenario.sites.len(), "wrote scenario");
        }
        None => println!("{}", scenario.to_json()?),
    }
    Ok(())
}
