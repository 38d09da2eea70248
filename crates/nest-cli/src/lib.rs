//! Nest CLI - command line tools for delivery route planning.
//!
//! This crate provides:
//! - plan_deliveries: plan routes for a scenario and report them
//! - generate_scenario: write a scenario file to start from

pub mod config;
pub mod report;
pub mod scenario;

pub use config::Config;
pub use scenario::ScenarioFile;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "nest_core=info,nest_cli=info,plan_deliveries=info,generate_scenario=info";

/// Log to stderr so that stdout stays free for reports.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}
