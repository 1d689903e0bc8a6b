//! Turn-based simulation controller
//!
//! Owns the grid, the RNG and the metrics series. Each step snapshots the
//! burning trees, shuffles the snapshot and lets every entry act once;
//! trees ignited during the step are absent from the snapshot and first
//! act in the following step. The run ends when no tree is on fire.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::fire::{self, IgnitionError};
use crate::grid::{ForestGrid, TreeCondition};
use crate::metrics::{MetricsCollector, MetricsRecord};
use crate::pattern::{self, SpatialPattern};

/// Parameters of one simulation run.
///
/// `density` and `pattern` only shape the initial forest; they are not
/// consulted again once generation completes. A `None` seed draws one
/// from OS entropy, an explicit seed makes the whole run reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub width: usize,
    pub height: usize,
    /// Fraction of candidate cells/blocks/columns that receive trees, in [0, 1].
    pub density: f64,
    pub pattern: SpatialPattern,
    pub seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        ForestConfig {
            width: 100,
            height: 100,
            density: 0.65,
            pattern: SpatialPattern::Random,
            seed: None,
        }
    }
}

/// Errors that can occur when setting up a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The ignition procedure found no 2x2 all-tree block.
    Ignition(IgnitionError),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::Ignition(err) => write!(f, "Failed to start fire: {err}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Ignition(err) => Some(err),
        }
    }
}

impl From<IgnitionError> for SimulationError {
    fn from(err: IgnitionError) -> Self {
        SimulationError::Ignition(err)
    }
}

/// A single forest fire simulation run.
#[derive(Debug)]
pub struct ForestFire {
    grid: ForestGrid,
    rng: StdRng,
    metrics: MetricsCollector,
    running: bool,
    steps: usize,
}

impl ForestFire {
    /// Build a running simulation: seed the RNG, generate the forest,
    /// ignite a 2x2 block and collect the initial metrics record.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Ignition`] when no ignitable block
    /// exists, e.g. at density 0 or on grids smaller than 2x2.
    pub fn new(config: &ForestConfig) -> Result<Self, SimulationError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut grid = ForestGrid::new(config.width, config.height);
        pattern::populate(&mut grid, config.pattern, config.density, &mut rng);
        fire::ignite_random_block(&mut grid, &mut rng)?;

        let mut metrics = MetricsCollector::new();
        metrics.collect(&grid);
        debug!(
            width = config.width,
            height = config.height,
            density = config.density,
            pattern = %config.pattern,
            trees = grid.tree_count(),
            "Simulation initialized"
        );
        Ok(ForestFire {
            grid,
            rng,
            metrics,
            running: true,
            steps: 0,
        })
    }

    /// Advance the simulation by one step; no-op once stopped.
    ///
    /// Every tree that was on fire at the start of the step acts exactly
    /// once, in an order shuffled fresh each step. A metrics record is
    /// collected afterwards, and the run stops when it shows no fire left.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        let mut burning = self.grid.positions_with(TreeCondition::OnFire);
        burning.shuffle(&mut self.rng);
        for (x, y) in burning {
            fire::spread_from(&mut self.grid, x, y, &mut self.rng);
        }
        self.steps += 1;
        self.metrics.collect(&self.grid);
        if let Some(record) = self.metrics.last() {
            debug!(
                step = self.steps,
                fine = record.fine,
                on_fire = record.on_fire,
                burned_out = record.burned_out,
                "Step complete"
            );
            if record.on_fire == 0 {
                self.running = false;
                info!(
                    steps = self.steps,
                    burned_percentage = record.percentage_burned_out,
                    "The fire has stopped"
                );
            }
        }
    }

    /// Step until the fire stops or `max_steps` further steps have been
    /// taken. Returns the number of steps taken by this call.
    pub fn run(&mut self, max_steps: Option<usize>) -> usize {
        let mut taken = 0;
        while self.running && max_steps.is_none_or(|budget| taken < budget) {
            self.step();
            taken += 1;
        }
        taken
    }

    /// False once no tree is on fire. Terminal: a stopped run never resumes.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Read access to the grid, for inspection and tests.
    pub fn grid(&self) -> &ForestGrid {
        &self.grid
    }

    /// Total number of trees placed at generation time.
    pub fn tree_count(&self) -> usize {
        self.grid.tree_count()
    }

    /// One record per collected step, initial record first.
    pub fn metrics_series(&self) -> &[MetricsRecord] {
        self.metrics.records()
    }

    /// Burned-out percentage of the latest record.
    pub fn final_burned_percentage(&self) -> f64 {
        self.metrics.final_burned_percentage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_model() {
        let config = ForestConfig::default();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 100);
        assert_eq!(config.density, 0.65);
        assert_eq!(config.pattern, SpatialPattern::Random);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn construction_collects_initial_record() {
        let sim = ForestFire::new(&ForestConfig {
            width: 10,
            height: 10,
            density: 1.0,
            pattern: SpatialPattern::Random,
            seed: Some(42),
        })
        .unwrap();
        assert!(sim.is_running());
        assert_eq!(sim.metrics_series().len(), 1);
        let record = &sim.metrics_series()[0];
        assert_eq!(record.on_fire, 4);
        assert_eq!(record.fine, 96);
        assert_eq!(record.burned_out, 0);
    }

    #[test]
    fn density_zero_fails_ignition() {
        let err = ForestFire::new(&ForestConfig {
            width: 10,
            height: 10,
            density: 0.0,
            pattern: SpatialPattern::Random,
            seed: Some(42),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Ignition(IgnitionError::NoIgnitableBlock { .. })
        ));
    }

    #[test]
    fn run_respects_step_budget() {
        let mut sim = ForestFire::new(&ForestConfig {
            width: 30,
            height: 30,
            density: 1.0,
            pattern: SpatialPattern::Random,
            seed: Some(42),
        })
        .unwrap();
        let taken = sim.run(Some(2));
        assert_eq!(taken, 2);
        assert_eq!(sim.steps(), 2);
        assert_eq!(sim.metrics_series().len(), 3);
    }

    #[test]
    fn run_without_budget_reaches_stopped() {
        let mut sim = ForestFire::new(&ForestConfig {
            width: 20,
            height: 20,
            density: 1.0,
            pattern: SpatialPattern::Random,
            seed: Some(7),
        })
        .unwrap();
        sim.run(None);
        assert!(!sim.is_running());
        assert_eq!(sim.metrics_series().last().unwrap().on_fire, 0);
    }
}
