//! Local search driver.
//!
//! Repeats [`LocalSearch::step`] until the iteration budget runs out or the
//! search stagnates. Because a step never accepts a worse or infeasible
//! state, the current state is always the best one found and the recorded
//! cost history is non-increasing.
//!
//! Every `validate_every` steps, and once at the end, the state is exported
//! and re-scored by [`score::evaluate`]. A disagreement between the scorer
//! and the internal checks aborts the run.

use super::config::LocalSearchConfig;
use super::engine::LocalSearch;
use crate::dataset::SolutionRecord;
use crate::error::AntennaError;
use crate::instance::Instance;
use crate::score;
use crate::state::SolutionState;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult {
    /// Best solution found, in exchange format.
    pub best: SolutionRecord,
    /// Cost of the best solution.
    pub best_cost: u64,
    /// Cost of the starting solution.
    pub initial_cost: u64,
    /// Steps executed.
    pub iterations: usize,
    /// Steps that lowered the cost.
    pub improvements: usize,
    /// Step after which the best solution was reached (0 = the start).
    pub best_iteration: usize,
    /// Best cost after each step.
    pub cost_history: Vec<u64>,
    /// How often each operator's result was kept.
    pub accepted_moves: BTreeMap<&'static str, usize>,
}

/// Local search runner.
pub struct LocalSearchRunner;

impl LocalSearchRunner {
    /// Improves a feasible solution.
    ///
    /// # Errors
    ///
    /// - [`AntennaError::InvalidConfig`] if `config` fails validation
    /// - [`AntennaError::InfeasibleStart`] if `initial` is not feasible
    /// - [`AntennaError::ValidatorDisagreement`] if the scorer rejects a
    ///   state or reports a different cost
    ///
    /// # Examples
    ///
    /// ```
    /// use u_antenna::construct::{GreedyConfig, GreedyConstructor};
    /// use u_antenna::local::{LocalSearchConfig, LocalSearchRunner};
    /// use u_antenna::model::{Building, Demand};
    /// use u_antenna::random::create_rng;
    /// use u_antenna::Instance;
    ///
    /// let instance = Instance::from_buildings(vec![
    ///     Building::new(1, 0, 0, Demand::new(40, 30, 10)),
    ///     Building::new(2, 60, 0, Demand::new(20, 50, 10)),
    /// ])
    /// .unwrap();
    /// let mut rng = create_rng(42);
    /// let start = GreedyConstructor::new(&instance, GreedyConfig::default())
    ///     .unwrap()
    ///     .construct(&mut rng)
    ///     .state;
    ///
    /// let result = LocalSearchRunner::run(&instance, start, &LocalSearchConfig::default(), &mut rng).unwrap();
    /// assert!(result.best_cost <= result.initial_cost);
    /// ```
    pub fn run<R: Rng>(
        instance: &Instance,
        initial: SolutionState,
        config: &LocalSearchConfig,
        rng: &mut R,
    ) -> Result<LocalSearchResult, AntennaError> {
        config.validate().map_err(AntennaError::InvalidConfig)?;
        initial.check_feasibility(instance)?;

        let engine = LocalSearch::new(config);
        let mut state = initial;
        let initial_cost = state.total_cost(instance);
        let mut best_cost = initial_cost;
        let mut best_iteration = 0;
        let mut improvements = 0;
        let mut no_improve_count = 0;
        let mut iterations = 0;
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut accepted_moves = BTreeMap::new();

        info!(
            antennas = state.len(),
            cost = initial_cost,
            max_iterations = config.max_iterations,
            "starting local search"
        );

        for iteration in 0..config.max_iterations {
            let outcome = engine.step(&mut state, instance, rng);
            iterations += 1;
            for name in &outcome.accepted {
                *accepted_moves.entry(*name).or_insert(0) += 1;
            }

            if outcome.improved() {
                best_cost = outcome.cost_after;
                best_iteration = iteration + 1;
                improvements += 1;
                no_improve_count = 0;
                debug!(iteration, cost = best_cost, antennas = state.len(), "improved");
            } else {
                no_improve_count += 1;
            }
            cost_history.push(best_cost);

            if iterations % config.validate_every == 0 {
                confirm(&state.to_record(instance), instance, best_cost)?;
            }
            if config.max_no_improve > 0 && no_improve_count >= config.max_no_improve {
                debug!(iteration, "stagnated");
                break;
            }
        }

        let best = state.to_record(instance);
        confirm(&best, instance, best_cost)?;

        info!(
            iterations,
            improvements,
            initial_cost,
            best_cost,
            antennas = state.len(),
            "local search finished"
        );

        Ok(LocalSearchResult {
            best,
            best_cost,
            initial_cost,
            iterations,
            improvements,
            best_iteration,
            cost_history,
            accepted_moves,
        })
    }
}

/// Re-scores `record` and checks it matches the tracked cost.
fn confirm(record: &SolutionRecord, instance: &Instance, expected: u64) -> Result<(), AntennaError> {
    let verdict = score::evaluate(record, instance);
    if !verdict.valid {
        error!(message = %verdict.message, "scorer rejected local search state");
        return Err(AntennaError::ValidatorDisagreement(verdict.message));
    }
    if verdict.cost != expected {
        error!(scored = verdict.cost, expected, "scorer cost differs from tracked cost");
        return Err(AntennaError::ValidatorDisagreement(format!(
            "scorer cost {} differs from tracked cost {expected}",
            verdict.cost
        )));
    }
    Ok(())
}
