//! Per-step aggregate metrics
//!
//! One record is collected right after construction and one after every
//! scheduler round. Records are append-only; the series drives the stop
//! condition and is the simulation's result.

use serde::{Deserialize, Serialize};

use crate::grid::{ForestGrid, TreeCondition};

/// Snapshot of the tree population after one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Trees untouched by fire.
    pub fine: usize,
    /// Trees currently burning.
    pub on_fire: usize,
    /// Trees finished burning.
    pub burned_out: usize,
    /// `burned_out / total * 100`, or 0 when the grid holds no trees.
    pub percentage_burned_out: f64,
}

/// Append-only collector of [`MetricsRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    records: Vec<MetricsRecord>,
}

impl MetricsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the tree population of `grid` and append a record.
    pub fn collect(&mut self, grid: &ForestGrid) {
        let fine = grid.count(TreeCondition::Fine);
        let on_fire = grid.count(TreeCondition::OnFire);
        let burned_out = grid.count(TreeCondition::BurnedOut);
        let total = fine + on_fire + burned_out;
        let percentage_burned_out = if total == 0 {
            0.0
        } else {
            burned_out as f64 / total as f64 * 100.0
        };
        self.records.push(MetricsRecord {
            fine,
            on_fire,
            burned_out,
            percentage_burned_out,
        });
    }

    /// Full ordered series, one record per collected step.
    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }

    /// Most recently collected record.
    pub fn last(&self) -> Option<&MetricsRecord> {
        self.records.last()
    }

    /// Burned-out percentage of the final record, 0 when nothing has been
    /// collected yet.
    pub fn final_burned_percentage(&self) -> f64 {
        self.last().map_or(0.0, |record| record.percentage_burned_out)
    }
}
