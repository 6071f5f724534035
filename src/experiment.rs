//! Multi-seed experiments.
//!
//! Runs one method over a list of seeds, scores every result with the
//! authoritative scorer and keeps the cheapest valid run. With the
//! `parallel` feature the seeds are solved on the rayon pool; runs are
//! reported in seed order either way.

use crate::dataset::SolutionRecord;
use crate::instance::Instance;
use crate::methods::Method;
use crate::score;
use crate::stats::SolutionStats;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of solving one seed.
#[derive(Debug, Clone, Serialize)]
pub struct SeedRun {
    pub seed: u64,
    /// Scored cost; zero when invalid.
    pub cost: u64,
    pub valid: bool,
    /// Scorer verdict, or the solver error if the method failed.
    pub message: String,
    /// Present when the method produced a solution.
    pub stats: Option<SolutionStats>,
    pub elapsed_ms: f64,
    #[serde(skip)]
    pub solution: Option<SolutionRecord>,
}

/// All runs of an experiment.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub method: String,
    pub runs: Vec<SeedRun>,
    /// Index into `runs` of the cheapest valid run. Earlier seeds win ties.
    pub best: Option<usize>,
}

impl ExperimentReport {
    pub fn best_run(&self) -> Option<&SeedRun> {
        self.best.map(|i| &self.runs[i])
    }

    pub fn valid_count(&self) -> usize {
        self.runs.iter().filter(|r| r.valid).count()
    }
}

/// Solves `instance` once per seed with `method`.
///
/// Solver errors are recorded as invalid runs rather than aborting the
/// experiment.
pub fn run_seeds(method: &dyn Method, instance: &Instance, seeds: &[u64], params: &Value) -> ExperimentReport {
    info!(method = method.name(), seeds = seeds.len(), buildings = instance.len(), "starting experiment");

    #[cfg(feature = "parallel")]
    let runs: Vec<SeedRun> = seeds
        .par_iter()
        .map(|&seed| run_one(method, instance, seed, params))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let runs: Vec<SeedRun> = seeds
        .iter()
        .map(|&seed| run_one(method, instance, seed, params))
        .collect();

    let mut best: Option<usize> = None;
    for (i, run) in runs.iter().enumerate() {
        if run.valid && best.map_or(true, |b| run.cost < runs[b].cost) {
            best = Some(i);
        }
    }

    let report = ExperimentReport {
        method: method.name().to_string(),
        runs,
        best,
    };
    match report.best_run() {
        Some(run) => info!(
            method = method.name(),
            valid = report.valid_count(),
            best_seed = run.seed,
            best_cost = run.cost,
            "experiment finished"
        ),
        None => warn!(method = method.name(), runs = report.runs.len(), "experiment produced no valid run"),
    }
    report
}

fn run_one(method: &dyn Method, instance: &Instance, seed: u64, params: &Value) -> SeedRun {
    let start = Instant::now();
    let outcome = method.solve(instance, seed, params);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;

    match outcome {
        Ok(solution) => {
            let verdict = score::evaluate(&solution, instance);
            debug!(seed, cost = verdict.cost, valid = verdict.valid, elapsed_ms, "seed solved");
            SeedRun {
                seed,
                cost: verdict.cost,
                valid: verdict.valid,
                message: verdict.message,
                stats: Some(SolutionStats::compute(&solution, instance)),
                elapsed_ms,
                solution: Some(solution),
            }
        }
        Err(e) => {
            warn!(seed, error = %e, "method failed");
            SeedRun {
                seed,
                cost: 0,
                valid: false,
                message: e.to_string(),
                stats: None,
                elapsed_ms,
                solution: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AntennaError;
    use crate::methods::{self, GreedyLocalSearch};
    use crate::testing::random_instance;
    use serde_json::json;

    #[test]
    fn test_runs_in_seed_order_and_best_is_cheapest() {
        let inst = random_instance(80, 700, 12);
        let seeds = [5, 1, 9, 3];
        let report = run_seeds(&GreedyLocalSearch, &inst, &seeds, &json!({ "iterations": 5 }));

        let order: Vec<u64> = report.runs.iter().map(|r| r.seed).collect();
        assert_eq!(order, seeds);
        assert_eq!(report.valid_count(), 4);

        let best = report.best_run().unwrap();
        let min = report.runs.iter().map(|r| r.cost).min().unwrap();
        assert_eq!(best.cost, min);
        assert!(best.solution.is_some());
        assert_eq!(best.stats.as_ref().unwrap().antenna_count, best.solution.as_ref().unwrap().antennas.len());
    }

    #[test]
    fn test_failures_recorded_per_seed() {
        let inst = random_instance(10, 200, 1);
        let method = methods::find("randomized_greedy").unwrap();
        let report = run_seeds(method, &inst, &[0, 1], &json!({ "radius_factor": 2.0 }));
        assert_eq!(report.runs.len(), 2);
        assert_eq!(report.valid_count(), 0);
        assert!(report.best.is_none());
        let expected = AntennaError::InvalidParams("radius_factor must be in (0, 1], got 2".into()).to_string();
        assert_eq!(report.runs[0].message, expected);
    }

    #[test]
    fn test_empty_seed_list() {
        let inst = random_instance(10, 200, 1);
        let report = run_seeds(&GreedyLocalSearch, &inst, &[], &Value::Null);
        assert!(report.runs.is_empty());
        assert!(report.best_run().is_none());
    }
}
