//! Row and column display order derived from the bicluster order.
//!
//! A vertex sorts by the display index of the first bicluster containing it.
//! Vertices outside every bicluster go to the end. The sort is stable, so
//! ties keep matrix input order.

use serde::{Deserialize, Serialize};

use crate::graph::BipartiteGraph;
use crate::model::{Bicluster, ColumnId, RowId};

use super::BiclusterOrder;

/// Display order of both axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisOrder {
    rows: Vec<RowId>,
    columns: Vec<ColumnId>,
    /// by `RowId`: index of the first bicluster holding the row
    row_keys: Vec<Option<usize>>,
    /// by `ColumnId`: index of the first bicluster holding the column
    column_keys: Vec<Option<usize>>,
    /// by `RowId`: position in `rows`
    row_positions: Vec<usize>,
    /// by `ColumnId`: position in `columns`
    column_positions: Vec<usize>,
}

impl AxisOrder {
    pub fn rows(&self) -> &[RowId] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    /// Sort key of a row; `None` means it belongs to no bicluster.
    pub fn row_key(&self, row: RowId) -> Option<usize> {
        self.row_keys.get(row.index()).copied().flatten()
    }

    pub fn column_key(&self, column: ColumnId) -> Option<usize> {
        self.column_keys.get(column.index()).copied().flatten()
    }

    /// Grid position of a row on the display axis.
    pub fn row_position(&self, row: RowId) -> Option<usize> {
        self.row_positions.get(row.index()).copied()
    }

    pub fn column_position(&self, column: ColumnId) -> Option<usize> {
        self.column_positions.get(column.index()).copied()
    }
}

/// Compute the axis order. `biclusters` is the enrichment output, indexed by id.
/// Members outside `graph` are ignored.
pub fn axis_order(
    graph: &BipartiteGraph,
    biclusters: &[Bicluster],
    order: &BiclusterOrder,
) -> AxisOrder {
    let mut row_keys = vec![None; graph.row_count()];
    let mut column_keys = vec![None; graph.column_count()];

    for (index, id) in order.iter().enumerate() {
        let Some(b) = biclusters.get(id.index()) else { continue };
        for r in b.rows() {
            if let Some(key) = row_keys.get_mut(r.index()) {
                key.get_or_insert(index);
            }
        }
        for c in b.columns() {
            if let Some(key) = column_keys.get_mut(c.index()) {
                key.get_or_insert(index);
            }
        }
    }

    let mut rows: Vec<RowId> = graph.rows().collect();
    rows.sort_by_key(|r| row_keys[r.index()].unwrap_or(usize::MAX));
    let mut columns: Vec<ColumnId> = graph.columns().collect();
    columns.sort_by_key(|c| column_keys[c.index()].unwrap_or(usize::MAX));

    let row_positions = positions(rows.iter().map(|r| r.index()), rows.len());
    let column_positions = positions(columns.iter().map(|c| c.index()), columns.len());

    tracing::debug!(
        rows = rows.len(),
        columns = columns.len(),
        uncovered_rows = row_keys.iter().filter(|k| k.is_none()).count(),
        uncovered_columns = column_keys.iter().filter(|k| k.is_none()).count(),
        "axis order"
    );

    AxisOrder { rows, columns, row_keys, column_keys, row_positions, column_positions }
}

/// Invert a permutation given as the sequence of vertex indices.
fn positions(sequence: impl Iterator<Item = usize>, len: usize) -> Vec<usize> {
    let mut out = vec![0; len];
    for (pos, vertex) in sequence.enumerate() {
        out[vertex] = pos;
    }
    out
}
