//! Fuzzy label resolution against one grid axis.

use crate::core::fields::Axis;
use crate::core::grid::Grid;
use crate::core::similarity;

/// Ordered sequence of normalized labels paired with their source index.
/// Built once per (grid, axis, index) and reused across field lookups so
/// every field sees identical match behavior.
#[derive(Debug, Clone)]
pub struct LabelIndex {
    entries: Vec<(usize, String)>,
}

impl LabelIndex {
    /// Labels read down `col`; resolved positions are row indices.
    pub fn from_column(grid: &Grid, col: usize) -> Self {
        Self {
            entries: grid.column(col).into_iter().enumerate().collect(),
        }
    }

    /// Labels read across `row`; resolved positions are column indices.
    pub fn from_row(grid: &Grid, row: usize) -> Self {
        Self {
            entries: grid.row(row).into_iter().enumerate().collect(),
        }
    }

    pub fn from_axis(grid: &Grid, axis: Axis, index: usize) -> Self {
        match axis {
            Axis::Rows => Self::from_column(grid, index),
            Axis::Columns => Self::from_row(grid, index),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the best label at or above `cutoff`, or `None` when no
    /// label clears it — a valid "field not present" outcome, not an error.
    /// On tied scores the earliest index wins, so repeated labels resolve
    /// deterministically.
    pub fn resolve(&self, search_term: &str, cutoff: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (position, label) in &self.entries {
            let score = similarity::ratio(search_term, label);
            if score < cutoff {
                continue;
            }
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((*position, score)),
            }
        }
        best.map(|(position, _)| position)
    }
}
