//! Planner defaults from the environment.

use std::env;
use std::thread;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `NEST_HIGH_RISK_PENALTY`; overrides the scenario's penalty when set.
    pub high_risk_penalty: Option<f64>,
    /// `NEST_MAX_RANGE`; overrides the scenario's range when set.
    pub maximum_range: Option<f64>,
    /// `NEST_WORKERS`; threads used by parallel planning.
    pub workers: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            high_risk_penalty: lookup("NEST_HIGH_RISK_PENALTY")
                .and_then(|s| s.parse().ok()),
            maximum_range: lookup("NEST_MAX_RANGE").and_then(|s| s.parse().ok()),
            workers: lookup("NEST_WORKERS")
                .and_then(|s| s.parse().ok())
                .filter(|&workers: &usize| workers > 0)
                .unwrap_or_else(default_workers),
        }
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("NEST_HIGH_RISK_PENALTY", "4.5"),
            ("NEST_MAX_RANGE", "not-a-number"),
            ("NEST_WORKERS", "3"),
        ]);
        let config = Config::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.high_risk_penalty, Some(4.5));
        assert_eq!(config.maximum_range, None);
        assert_eq!(config.workers, 3);
    }

    #[test]
    fn zero_workers_falls_back_to_default() {
        let config = Config::from_vars(|key| (key == "NEST_WORKERS").then(|| "0".to_string()));
        assert!(config.workers >= 1);
        assert_eq!(config.high_risk_penalty, None);
    }
}
