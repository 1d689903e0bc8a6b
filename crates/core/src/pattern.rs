//! Spatial seeding patterns for the initial forest
//!
//! All three strategies place trees with probability `density`, but group
//! the Bernoulli trials differently: per cell (Random), per 3x3 block
//! (Clustered), or per column (Lines). Grouping is what changes the
//! connectivity of the resulting forest, and with it how far a fire can
//! travel at a given density.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::ForestGrid;

/// Side length of the square blocks used by [`SpatialPattern::Clustered`].
/// Blocks at the right and bottom edges are truncated to fit.
pub const CLUSTER_SIZE: usize = 3;

/// Strategy used to seed the initial forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialPattern {
    /// Every cell is an independent Bernoulli(density) trial.
    Random,
    /// One trial per 3x3 block; a success fills the whole block.
    Clustered,
    /// One trial per column; a success fills the whole column.
    Lines,
}

impl std::fmt::Display for SpatialPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpatialPattern::Random => write!(f, "Random"),
            SpatialPattern::Clustered => write!(f, "Clustered"),
            SpatialPattern::Lines => write!(f, "Lines"),
        }
    }
}

/// Populate `grid` with trees according to `pattern`.
///
/// Every placement is preceded by an emptiness check, so placement cannot
/// fail on a freshly constructed grid; cells already occupied are skipped.
pub fn populate<R: Rng>(grid: &mut ForestGrid, pattern: SpatialPattern, density: f64, rng: &mut R) {
    match pattern {
        SpatialPattern::Random => place_trees_random(grid, density, rng),
        SpatialPattern::Clustered => place_trees_clustered(grid, density, rng),
        SpatialPattern::Lines => place_trees_lines(grid, density, rng),
    }
}

fn place_trees_random<R: Rng>(grid: &mut ForestGrid, density: f64, rng: &mut R) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if rng.random::<f64>() < density && grid.is_empty(x, y) {
                let _ = grid.place_tree(x, y);
            }
        }
    }
}

fn place_trees_clustered<R: Rng>(grid: &mut ForestGrid, density: f64, rng: &mut R) {
    for block_x in (0..grid.width()).step_by(CLUSTER_SIZE) {
        for block_y in (0..grid.height()).step_by(CLUSTER_SIZE) {
            if rng.random::<f64>() >= density {
                continue;
            }
            for x in block_x..(block_x + CLUSTER_SIZE).min(grid.width()) {
                for y in block_y..(block_y + CLUSTER_SIZE).min(grid.height()) {
                    if grid.is_empty(x, y) {
                        let _ = grid.place_tree(x, y);
                    }
                }
            }
        }
    }
}

fn place_trees_lines<R: Rng>(grid: &mut ForestGrid, density: f64, rng: &mut R) {
    for x in 0..grid.width() {
        if rng.random::<f64>() >= density {
            continue;
        }
        for y in 0..grid.height() {
            if grid.is_empty(x, y) {
                let _ = grid.place_tree(x, y);
            }
        }
    }
}
