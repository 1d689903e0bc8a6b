//! Ignition and the stochastic fire spread rule
//!
//! Both operations are pure functions over a grid, coordinates and an
//! explicit RNG handle, so they can be unit-tested without a scheduler
//! and reproduced from a seed.

use rand::Rng;
use tracing::debug;

use crate::grid::{ForestGrid, TreeCondition};

/// Ignition probability for the eight adjacent neighbors of a burning tree.
pub const RADIUS_1_IGNITION_PROBABILITY: f64 = 0.8;

/// Ignition probability for the Chebyshev radius-2 disk around a burning
/// tree. The disk re-includes the adjacent ring, so adjacent trees that
/// survived the first roll get a second, independent low-probability roll.
/// That overlap is part of the observed model and is kept as-is.
pub const RADIUS_2_IGNITION_PROBABILITY: f64 = 0.05;

/// Upper bound on corner samples when searching for an ignitable block.
/// The reference behavior retries forever; the bound only turns a stall
/// on sparse grids into a named error.
pub const MAX_IGNITION_ATTEMPTS: u32 = 10_000;

/// Failure to start a fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnitionError {
    /// No 2x2 all-tree block was found within the attempt budget, or the
    /// grid is too small to contain one.
    NoIgnitableBlock { attempts: u32 },
}

impl std::fmt::Display for IgnitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnitionError::NoIgnitableBlock { attempts } => write!(
                f,
                "No ignitable 2x2 tree block found after {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for IgnitionError {}

/// Start the fire by igniting a random 2x2 agglomeration of trees.
///
/// Samples a top-left corner uniformly from `[0, width-2] x [0, height-2]`
/// and accepts it iff all four block cells hold trees; every Fine tree in
/// the accepted block becomes `OnFire`. Returns the block coordinates.
///
/// # Errors
///
/// Returns [`IgnitionError::NoIgnitableBlock`] when the grid is smaller
/// than 2x2 or no valid block turns up within [`MAX_IGNITION_ATTEMPTS`]
/// samples (e.g. at very low densities).
pub fn ignite_random_block<R: Rng>(
    grid: &mut ForestGrid,
    rng: &mut R,
) -> Result<[(usize, usize); 4], IgnitionError> {
    if grid.width() < 2 || grid.height() < 2 {
        return Err(IgnitionError::NoIgnitableBlock { attempts: 0 });
    }
    for attempt in 1..=MAX_IGNITION_ATTEMPTS {
        let x = rng.random_range(0..=grid.width() - 2);
        let y = rng.random_range(0..=grid.height() - 2);
        let block = [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)];
        if block.iter().all(|&(bx, by)| grid.condition(bx, by).is_some()) {
            for (bx, by) in block {
                if grid.condition(bx, by) == Some(TreeCondition::Fine) {
                    grid.set_condition(bx, by, TreeCondition::OnFire);
                }
            }
            debug!(attempt, x, y, "Ignited 2x2 tree block");
            return Ok(block);
        }
    }
    Err(IgnitionError::NoIgnitableBlock {
        attempts: MAX_IGNITION_ATTEMPTS,
    })
}

/// Apply one turn of the fire spread rule to the tree at `(x, y)`.
///
/// No-op unless the tree is currently `OnFire`. Otherwise each Fine tree
/// in the adjacent ring ignites with probability
/// [`RADIUS_1_IGNITION_PROBABILITY`], each Fine tree in the radius-2 disk
/// (adjacent ring included, see the constant's note) ignites with
/// probability [`RADIUS_2_IGNITION_PROBABILITY`], and the acting tree
/// burns out unconditionally. Each draw is independent; a neighbor that
/// ignited in the first pass is no longer Fine and is skipped without
/// consuming a draw in the second.
pub fn spread_from<R: Rng>(grid: &mut ForestGrid, x: usize, y: usize, rng: &mut R) {
    if grid.condition(x, y) != Some(TreeCondition::OnFire) {
        return;
    }
    for (nx, ny) in grid.neighbors(x, y, 1) {
        if grid.condition(nx, ny) == Some(TreeCondition::Fine)
            && rng.random::<f64>() < RADIUS_1_IGNITION_PROBABILITY
        {
            grid.set_condition(nx, ny, TreeCondition::OnFire);
        }
    }
    for (nx, ny) in grid.neighbors(x, y, 2) {
        if grid.condition(nx, ny) == Some(TreeCondition::Fine)
            && rng.random::<f64>() < RADIUS_2_IGNITION_PROBABILITY
        {
            grid.set_condition(nx, ny, TreeCondition::OnFire);
        }
    }
    grid.set_condition(x, y, TreeCondition::BurnedOut);
}
