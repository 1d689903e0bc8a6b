//! Forest Fire Simulation Core Library
//!
//! A stochastic cellular automaton for studying wildfire propagation on a
//! 2-D grid of trees: how the spatial arrangement (random, clustered, or
//! line-planted forests) and tree density affect the fraction of trees
//! left standing once the fire dies out.
//!
//! A run seeds the grid with one of three spatial patterns, ignites a
//! random 2x2 block of trees, then advances in discrete steps. Each step,
//! every burning tree ignites nearby trees probabilistically and burns
//! out; the run stops when no tree is on fire. Per-step population counts
//! are collected into an append-only metrics series that doubles as the
//! simulation result.
//!
//! All randomness flows through one explicit, seedable RNG per run, so
//! results are reproducible and independent runs can execute in parallel.

pub mod fire;
pub mod grid;
pub mod metrics;
pub mod pattern;
pub mod simulation;

pub use fire::{
    IgnitionError, MAX_IGNITION_ATTEMPTS, RADIUS_1_IGNITION_PROBABILITY,
    RADIUS_2_IGNITION_PROBABILITY,
};
pub use grid::{ForestGrid, GridError, TreeCondition};
pub use metrics::{MetricsCollector, MetricsRecord};
pub use pattern::{SpatialPattern, CLUSTER_SIZE};
pub use simulation::{ForestConfig, ForestFire, SimulationError};
