//! Filter and highlight state.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::{BiclusterId, ColumnId, RowId};

/// What the presentation layer draws.
///
/// The filtered collections are ordered subsets of the universe in display
/// order. The selected sets are the transient highlight. A value of this type
/// is never edited in place by the engine: every transition builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub(super) filtered_biclusters: Vec<BiclusterId>,
    pub(super) filtered_rows: Vec<RowId>,
    pub(super) filtered_cols: Vec<ColumnId>,
    pub(super) selected_biclusters: HashSet<BiclusterId>,
    pub(super) selected_rows: HashSet<RowId>,
    pub(super) selected_cols: HashSet<ColumnId>,
}

impl SelectionState {
    pub fn filtered_biclusters(&self) -> &[BiclusterId] {
        &self.filtered_biclusters
    }

    pub fn filtered_rows(&self) -> &[RowId] {
        &self.filtered_rows
    }

    pub fn filtered_cols(&self) -> &[ColumnId] {
        &self.filtered_cols
    }

    pub fn selected_biclusters(&self) -> &HashSet<BiclusterId> {
        &self.selected_biclusters
    }

    pub fn selected_rows(&self) -> &HashSet<RowId> {
        &self.selected_rows
    }

    pub fn selected_cols(&self) -> &HashSet<ColumnId> {
        &self.selected_cols
    }

    pub fn is_bicluster_selected(&self, id: BiclusterId) -> bool {
        self.selected_biclusters.contains(&id)
    }

    pub fn is_row_selected(&self, row: RowId) -> bool {
        self.selected_rows.contains(&row)
    }

    pub fn is_col_selected(&self, column: ColumnId) -> bool {
        self.selected_cols.contains(&column)
    }

    /// True when any highlight is active.
    pub fn has_selection(&self) -> bool {
        !(self.selected_biclusters.is_empty()
            && self.selected_rows.is_empty()
            && self.selected_cols.is_empty())
    }

    /// Same filters, no highlight.
    pub(super) fn without_selection(&self) -> Self {
        Self {
            filtered_biclusters: self.filtered_biclusters.clone(),
            filtered_rows: self.filtered_rows.clone(),
            filtered_cols: self.filtered_cols.clone(),
            ..Self::default()
        }
    }

    /// Same filters, the given highlight.
    pub(super) fn with_selection(
        &self,
        biclusters: HashSet<BiclusterId>,
        rows: HashSet<RowId>,
        cols: HashSet<ColumnId>,
    ) -> Self {
        Self {
            selected_biclusters: biclusters,
            selected_rows: rows,
            selected_cols: cols,
            ..self.without_selection()
        }
    }
}
