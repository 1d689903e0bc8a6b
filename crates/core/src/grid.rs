//! Dense 2-D forest grid with Chebyshev neighbor queries
//!
//! The grid is a fixed-size, row-major container of cells. A cell either
//! holds a tree with a [`TreeCondition`] or is empty; empty cells carry no
//! condition and never transition. There is no wraparound: edge cells simply
//! have fewer neighbors.

use serde::{Deserialize, Serialize};

/// Condition of a tree occupying a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeCondition {
    /// Untouched by fire.
    Fine,
    /// Currently burning; will act once in the next scheduler round.
    OnFire,
    /// Finished burning. Terminal.
    BurnedOut,
}

/// Errors from placement and query operations on the grid.
///
/// Both variants indicate caller bugs (bad coordinates, double placement)
/// rather than recoverable conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinates outside the grid extents. Never silently clamped.
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Placement requested on a cell that already holds a tree.
    OccupiedCell { x: usize, y: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "Coordinates ({x}, {y}) outside {width}x{height} grid")
            }
            GridError::OccupiedCell { x, y } => {
                write!(f, "Cell ({x}, {y}) already holds a tree")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Fixed-size 2-D grid of tree cells.
///
/// Cells are stored row-major; `(x, y)` indexes column `x` of row `y`.
/// Exactly one cell exists per coordinate pair, so no two trees can share
/// a position. The grid is created once per simulation and mutated in
/// place; it is never resized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<TreeCondition>>,
}

impl ForestGrid {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "Grid dimensions must be positive, got {width}x{height}"
        );
        ForestGrid {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Place a Fine tree at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid
    /// and [`GridError::OccupiedCell`] when a tree is already present.
    pub fn place_tree(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        if !self.in_bounds(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        if self.cells[idx].is_some() {
            return Err(GridError::OccupiedCell { x, y });
        }
        self.cells[idx] = Some(TreeCondition::Fine);
        Ok(())
    }

    /// True iff `(x, y)` is in bounds and holds no tree.
    pub fn is_empty(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.cells[self.index(x, y)].is_none()
    }

    /// Condition of the tree at `(x, y)`, or `None` for empty or
    /// out-of-bounds cells.
    pub fn condition(&self, x: usize, y: usize) -> Option<TreeCondition> {
        if self.in_bounds(x, y) {
            self.cells[self.index(x, y)]
        } else {
            None
        }
    }

    /// Update the condition of the tree at `(x, y)`.
    ///
    /// Empty and out-of-bounds cells are left untouched: a condition is
    /// meaningful only for an occupied cell.
    pub fn set_condition(&mut self, x: usize, y: usize, condition: TreeCondition) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        if self.cells[idx].is_some() {
            self.cells[idx] = Some(condition);
        }
    }

    /// Coordinates of occupied cells within Chebyshev distance `radius` of
    /// `(x, y)`, center excluded, clipped to the grid bounds.
    ///
    /// The result is the full disk, deduplicated by construction: a call
    /// with `radius = 2` includes the radius-1 ring again. The fire spread
    /// rule relies on that overlap.
    ///
    /// # Panics
    ///
    /// Panics if the center is out of bounds; neighbor queries from
    /// nonexistent cells are programming errors.
    #[must_use]
    pub fn neighbors(&self, x: usize, y: usize, radius: usize) -> Vec<(usize, usize)> {
        assert!(
            self.in_bounds(x, y),
            "Neighbor query center ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        let x_min = x.saturating_sub(radius);
        let y_min = y.saturating_sub(radius);
        let x_max = (x + radius).min(self.width - 1);
        let y_max = (y + radius).min(self.height - 1);
        let mut found = Vec::new();
        for ny in y_min..=y_max {
            for nx in x_min..=x_max {
                if nx == x && ny == y {
                    continue;
                }
                if self.cells[self.index(nx, ny)].is_some() {
                    found.push((nx, ny));
                }
            }
        }
        found
    }

    /// Coordinates of every tree currently in `condition`, in row-major
    /// order.
    #[must_use]
    pub fn positions_with(&self, condition: TreeCondition) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[self.index(x, y)] == Some(condition) {
                    found.push((x, y));
                }
            }
        }
        found
    }

    /// Number of trees currently in `condition`.
    pub fn count(&self, condition: TreeCondition) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Some(condition))
            .count()
    }

    /// Total number of trees on the grid, regardless of condition.
    pub fn tree_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_grid(width: usize, height: usize) -> ForestGrid {
        let mut grid = ForestGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.place_tree(x, y).unwrap();
            }
        }
        grid
    }

    #[test]
    fn place_tree_marks_cell_fine() {
        let mut grid = ForestGrid::new(4, 4);
        assert!(grid.is_empty(2, 3));
        grid.place_tree(2, 3).unwrap();
        assert!(!grid.is_empty(2, 3));
        assert_eq!(grid.condition(2, 3), Some(TreeCondition::Fine));
        assert_eq!(grid.tree_count(), 1);
    }

    #[test]
    fn place_tree_rejects_out_of_bounds() {
        let mut grid = ForestGrid::new(4, 4);
        let err = grid.place_tree(4, 0).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 4
            }
        );
    }

    #[test]
    fn place_tree_rejects_occupied_cell() {
        let mut grid = ForestGrid::new(4, 4);
        grid.place_tree(1, 1).unwrap();
        let err = grid.place_tree(1, 1).unwrap_err();
        assert_eq!(err, GridError::OccupiedCell { x: 1, y: 1 });
    }

    #[test]
    fn is_empty_false_out_of_bounds() {
        let grid = ForestGrid::new(4, 4);
        assert!(!grid.is_empty(10, 10));
        assert_eq!(grid.condition(10, 10), None);
    }

    #[test]
    fn set_condition_ignores_empty_cells() {
        let mut grid = ForestGrid::new(4, 4);
        grid.set_condition(0, 0, TreeCondition::OnFire);
        assert_eq!(grid.condition(0, 0), None);
        assert!(grid.is_empty(0, 0));
    }

    #[test]
    fn corner_tree_has_three_radius_one_neighbors() {
        let grid = full_grid(3, 3);
        let neighbors = grid.neighbors(0, 0, 1);
        assert_eq!(neighbors.len(), 3);
        for (nx, ny) in neighbors {
            assert!(nx < 3 && ny < 3);
        }
    }

    #[test]
    fn center_tree_has_eight_radius_one_neighbors() {
        let grid = full_grid(3, 3);
        assert_eq!(grid.neighbors(1, 1, 1).len(), 8);
    }

    #[test]
    fn radius_two_disk_includes_first_ring() {
        let grid = full_grid(5, 5);
        let disk = grid.neighbors(2, 2, 2);
        // 5x5 window minus the center: 8 first-ring + 16 second-ring cells
        assert_eq!(disk.len(), 24);
        assert!(disk.contains(&(1, 1)));
        assert!(disk.contains(&(0, 0)));
        assert!(!disk.contains(&(2, 2)));
    }

    #[test]
    fn neighbors_skip_empty_cells() {
        let mut grid = ForestGrid::new(3, 3);
        grid.place_tree(1, 1).unwrap();
        grid.place_tree(0, 1).unwrap();
        let neighbors = grid.neighbors(1, 1, 1);
        assert_eq!(neighbors, vec![(0, 1)]);
    }

    #[test]
    fn positions_with_reports_row_major_order() {
        let mut grid = ForestGrid::new(3, 2);
        grid.place_tree(2, 0).unwrap();
        grid.place_tree(0, 1).unwrap();
        grid.set_condition(0, 1, TreeCondition::OnFire);
        assert_eq!(
            grid.positions_with(TreeCondition::Fine),
            vec![(2, 0)]
        );
        assert_eq!(
            grid.positions_with(TreeCondition::OnFire),
            vec![(0, 1)]
        );
        assert_eq!(grid.count(TreeCondition::BurnedOut), 0);
    }
}
