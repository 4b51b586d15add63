//! Enriched bicluster record.

use hashbrown::HashSet;
use serde::Serialize;

use super::{BiclusterId, ColumnId, Edge, RowId};

/// A dense (or near-dense) block of the presence matrix.
///
/// Produced once by [`crate::enrich::enrich`] and never widened afterwards:
/// every field is private and read through accessors. The display position
/// of a bicluster is not stored here; see [`crate::order::BiclusterOrder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bicluster {
    id: BiclusterId,
    columns: Vec<ColumnId>,
    rows: Vec<RowId>,
    edges: Vec<Edge>,
    column_weights: Vec<f64>,
    row_weights: Vec<f64>,
    #[serde(skip)]
    column_set: HashSet<ColumnId>,
    #[serde(skip)]
    row_set: HashSet<RowId>,
}

impl Bicluster {
    pub(crate) fn new(
        id: BiclusterId,
        columns: Vec<ColumnId>,
        rows: Vec<RowId>,
        edges: Vec<Edge>,
        column_weights: Vec<f64>,
        row_weights: Vec<f64>,
    ) -> Self {
        let column_set = columns.iter().copied().collect();
        let row_set = rows.iter().copied().collect();
        Self { id, columns, rows, edges, column_weights, row_weights, column_set, row_set }
    }

    pub fn id(&self) -> BiclusterId {
        self.id
    }

    /// Member columns in the order the miner reported them.
    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    /// Member rows in the order the miner reported them.
    pub fn rows(&self) -> &[RowId] {
        &self.rows
    }

    /// Graph edges with both endpoints inside the block, column-major.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Fraction of `rows` each column is connected to, aligned with `columns`.
    pub fn column_weights(&self) -> &[f64] {
        &self.column_weights
    }

    /// Fraction of `columns` each row is connected to, aligned with `rows`.
    pub fn row_weights(&self) -> &[f64] {
        &self.row_weights
    }

    pub fn has_column(&self, column: ColumnId) -> bool {
        self.column_set.contains(&column)
    }

    pub fn has_row(&self, row: RowId) -> bool {
        self.row_set.contains(&row)
    }

    /// True when the cell `(column, row)` lies inside the block.
    pub fn contains(&self, column: ColumnId, row: RowId) -> bool {
        self.has_column(column) && self.has_row(row)
    }

    pub fn column_weight(&self, column: ColumnId) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == column)?;
        self.column_weights.get(i).copied()
    }

    pub fn row_weight(&self, row: RowId) -> Option<f64> {
        let i = self.rows.iter().position(|r| *r == row)?;
        self.row_weights.get(i).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Degenerate candidate: no graph edge falls inside the block.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge density of the block in `[0, 1]`; `0.0` when either side is empty.
    pub fn density(&self) -> f64 {
        let cells = self.columns.len() * self.rows.len();
        if cells == 0 { 0.0 } else { self.edges.len() as f64 / cells as f64 }
    }
}
