//! User events driving the selection reducer.

use serde::{Deserialize, Serialize};

use crate::model::{BiclusterId, ColumnId, RowId};

/// A user interaction on the matrix view.
///
/// Hover events replace the highlight, leave events clear it, click events
/// replace the filter. `ClearFilter` resets the filter to the full universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    HoverEdge { row: RowId, column: ColumnId },
    LeaveEdge,
    ClickEdge { row: RowId, column: ColumnId },

    HoverBicluster(BiclusterId),
    LeaveBicluster,
    ClickBicluster(BiclusterId),

    HoverColumn(ColumnId),
    LeaveColumn,
    ClickColumn(ColumnId),

    HoverRow(RowId),
    LeaveRow,
    ClickRow(RowId),

    ClearHighlight,
    ClearFilter,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::HoverEdge { .. } => "hover_edge",
            Event::LeaveEdge => "leave_edge",
            Event::ClickEdge { .. } => "click_edge",
            Event::HoverBicluster(_) => "hover_bicluster",
            Event::LeaveBicluster => "leave_bicluster",
            Event::ClickBicluster(_) => "click_bicluster",
            Event::HoverColumn(_) => "hover_column",
            Event::LeaveColumn => "leave_column",
            Event::ClickColumn(_) => "click_column",
            Event::HoverRow(_) => "hover_row",
            Event::LeaveRow => "leave_row",
            Event::ClickRow(_) => "click_row",
            Event::ClearHighlight => "clear_highlight",
            Event::ClearFilter => "clear_filter",
        }
    }

    pub fn is_hover(&self) -> bool {
        matches!(
            self,
            Event::HoverEdge { .. } | Event::HoverBicluster(_) | Event::HoverColumn(_) | Event::HoverRow(_)
        )
    }

    pub fn is_click(&self) -> bool {
        matches!(
            self,
            Event::ClickEdge { .. } | Event::ClickBicluster(_) | Event::ClickColumn(_) | Event::ClickRow(_)
        )
    }

    /// Leave events and `ClearHighlight`: drop the highlight, keep the filter.
    pub fn is_leave(&self) -> bool {
        matches!(
            self,
            Event::LeaveEdge | Event::LeaveBicluster | Event::LeaveColumn | Event::LeaveRow | Event::ClearHighlight
        )
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::HoverEdge { row, column } | Event::ClickEdge { row, column } => {
                write!(f, "{}({column}, {row})", self.name())
            }
            Event::HoverBicluster(b) | Event::ClickBicluster(b) => write!(f, "{}({b})", self.name()),
            Event::HoverColumn(c) | Event::ClickColumn(c) => write!(f, "{}({c})", self.name()),
            Event::HoverRow(r) | Event::ClickRow(r) => write!(f, "{}({r})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}
