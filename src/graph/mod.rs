//! Bipartite presence graph.
//!
//! One vertex per matrix column and per matrix row, and a directed edge
//! column → row for every truthy cell. Vertex names are resolved to typed
//! handles once, here; every later stage works on [`ColumnId`] / [`RowId`].
//!
//! ## Limitations
//!
//! - **Immutable**: built once from a [`Matrix`]; there is no vertex or edge
//!   mutation API.
//! - **Unique names per side**: duplicate column names or duplicate row names
//!   are rejected because vertex identity would be ambiguous.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::model::{ColumnId, Edge, Matrix, RowId};
use crate::{Error, Result};

type RowList = SmallVec<[RowId; 8]>;
type ColumnList = SmallVec<[ColumnId; 8]>;

/// Convert a position into a `u32` handle, failing past `u32::MAX`.
pub(crate) fn handle(position: usize, kind: &str) -> Result<u32> {
    u32::try_from(position)
        .map_err(|_| Error::InvalidInput(format!("too many {kind}s: position {position} exceeds u32::MAX")))
}

// ============================================================================
// BipartiteGraph
// ============================================================================

/// Column → row presence graph.
#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    column_names: Vec<String>,
    row_names: Vec<String>,
    column_index: HashMap<String, ColumnId>,
    row_index: HashMap<String, RowId>,
    edges: HashSet<Edge>,
    /// column → rows, in row input order
    out_adjacency: Vec<RowList>,
    /// row → columns, in column input order
    in_adjacency: Vec<ColumnList>,
}

impl BipartiteGraph {
    /// Build the graph from a presence matrix.
    pub fn from_matrix(matrix: &Matrix) -> Result<Self> {
        let mut column_index = HashMap::with_capacity(matrix.columns.len());
        for (i, name) in matrix.columns.iter().enumerate() {
            if column_index.insert(name.clone(), ColumnId(handle(i, "column")?)).is_some() {
                return Err(Error::InvalidInput(format!("duplicate column '{name}'")));
            }
        }

        let mut row_index = HashMap::with_capacity(matrix.records.len());
        for (i, record) in matrix.records.iter().enumerate() {
            if row_index.insert(record.name.clone(), RowId(handle(i, "row")?)).is_some() {
                return Err(Error::InvalidInput(format!("duplicate row '{}'", record.name)));
            }
        }

        let mut edges = HashSet::new();
        let mut out_adjacency = vec![RowList::new(); matrix.columns.len()];
        let mut in_adjacency = vec![ColumnList::new(); matrix.records.len()];

        for (r, record) in matrix.records.iter().enumerate() {
            // both sides were range-checked above
            let row = RowId(r as u32);
            for (c, column) in matrix.columns.iter().enumerate() {
                if record.is_present(column) {
                    let col = ColumnId(c as u32);
                    edges.insert((col, row));
                    out_adjacency[c].push(row);
                    in_adjacency[r].push(col);
                }
            }
        }

        tracing::debug!(
            columns = matrix.columns.len(),
            rows = matrix.records.len(),
            edges = edges.len(),
            "built bipartite graph"
        );

        Ok(Self {
            column_names: matrix.columns.clone(),
            row_names: matrix.records.iter().map(|r| r.name.clone()).collect(),
            column_index,
            row_index,
            edges,
            out_adjacency,
            in_adjacency,
        })
    }

    // ========================================================================
    // Adjacency
    // ========================================================================

    pub fn has_edge(&self, column: ColumnId, row: RowId) -> bool {
        self.edges.contains(&(column, row))
    }

    /// Rows connected to `column`, in row input order. Empty for unknown ids.
    pub fn out_neighbors(&self, column: ColumnId) -> &[RowId] {
        self.out_adjacency.get(column.index()).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Columns connected to `row`, in column input order. Empty for unknown ids.
    pub fn in_neighbors(&self, row: RowId) -> &[ColumnId] {
        self.in_adjacency.get(row.index()).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ========================================================================
    // Vertices
    // ========================================================================

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_names.len()
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = ColumnId> + '_ {
        (0..self.column_names.len()).map(|i| ColumnId(i as u32))
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = RowId> + '_ {
        (0..self.row_names.len()).map(|i| RowId(i as u32))
    }

    pub fn contains_column(&self, column: ColumnId) -> bool {
        column.index() < self.column_names.len()
    }

    pub fn contains_row(&self, row: RowId) -> bool {
        row.index() < self.row_names.len()
    }

    pub fn column_id(&self, name: &str) -> Option<ColumnId> {
        self.column_index.get(name).copied()
    }

    pub fn row_id(&self, name: &str) -> Option<RowId> {
        self.row_index.get(name).copied()
    }

    pub fn column_name(&self, column: ColumnId) -> Option<&str> {
        self.column_names.get(column.index()).map(String::as_str)
    }

    pub fn row_name(&self, row: RowId) -> Option<&str> {
        self.row_names.get(row.index()).map(String::as_str)
    }

    /// Resolve a column name or fail with [`Error::NotFound`].
    pub fn require_column(&self, name: &str) -> Result<ColumnId> {
        self.column_id(name).ok_or_else(|| Error::NotFound(format!("column '{name}'")))
    }

    /// Resolve a row name or fail with [`Error::NotFound`].
    pub fn require_row(&self, name: &str) -> Result<RowId> {
        self.row_id(name).ok_or_else(|| Error::NotFound(format!("row '{name}'")))
    }
}

// ============================================================================
// Tests
// ============================================================================
