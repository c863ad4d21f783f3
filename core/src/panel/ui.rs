//! Interfaces the shelf view is wired to.

use crate::types::Row;
use std::path::PathBuf;

/// Supplies table rows.
pub trait RowProvider {
    fn row_count(&self) -> usize;
    fn row(&self, index: usize) -> Option<Row>;
    fn rows(&self) -> Vec<Row>;
}

/// Receives files dropped onto the shelf.
pub trait DropTarget {
    /// Returns `true` if at least one dropped location was newly stored.
    fn accept_drop(&mut self, paths: &[PathBuf]) -> bool;
}

/// Provides locations for rows dragged out of the shelf (copy semantics).
pub trait DragSource {
    /// Resolved, reachable paths for `rows`, in the given order.
    fn drag_items(&self, rows: &[usize]) -> Vec<PathBuf>;
}
