//! View snapshot export: serialize the current view for a presentation layer.
//!
//! Produces a JSON document with everything a renderer needs to draw the
//! current frame: filtered biclusters in display order with their
//! per-member weights, the filtered axes and the highlight.
//!
//! ```text
//! Session → export_view_json() → { biclusters, rows, columns, selected_* }
//!   → hand to a web front end, or diff between frames in tests
//! ```

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::BipartiteGraph;
use crate::model::Bicluster;
use crate::{Result, Session};

/// One drawn bicluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiclusterView {
    /// Display index in the full order.
    pub index: usize,
    pub id: u32,
    pub columns: Vec<String>,
    pub rows: Vec<String>,
    /// Opacity per column.
    pub column_weights: BTreeMap<String, f64>,
    /// Opacity per row.
    pub row_weights: BTreeMap<String, f64>,
    pub highlighted: bool,
}

/// Everything drawn for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub exported_at: DateTime<Utc>,
    pub biclusters: Vec<BiclusterView>,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub selected_rows: Vec<String>,
    pub selected_columns: Vec<String>,
}

/// Capture the session's current view.
pub fn snapshot(session: &Session) -> ViewSnapshot {
    let graph = session.graph();
    let state = session.state();
    let order = session.bicluster_order();

    let biclusters = state
        .filtered_biclusters()
        .iter()
        .filter_map(|id| session.bicluster(*id))
        .map(|b| BiclusterView {
            index: order.index_of(b.id()).unwrap_or(usize::MAX),
            id: b.id().0,
            columns: b.columns().iter().filter_map(|c| graph.column_name(*c)).map(str::to_owned).collect(),
            rows: b.rows().iter().filter_map(|r| graph.row_name(*r)).map(str::to_owned).collect(),
            column_weights: column_weights(graph, b),
            row_weights: row_weights(graph, b),
            highlighted: state.is_bicluster_selected(b.id()),
        })
        .collect();

    // highlight lists follow axis display order
    let axes = session.axis_order();
    let selected_rows = axes
        .rows()
        .iter()
        .filter(|r| state.is_row_selected(**r))
        .filter_map(|r| graph.row_name(*r))
        .map(str::to_owned)
        .collect();
    let selected_columns = axes
        .columns()
        .iter()
        .filter(|c| state.is_col_selected(**c))
        .filter_map(|c| graph.column_name(*c))
        .map(str::to_owned)
        .collect();

    ViewSnapshot {
        exported_at: Utc::now(),
        biclusters,
        rows: state.filtered_rows().iter().filter_map(|r| graph.row_name(*r)).map(str::to_owned).collect(),
        columns: state.filtered_cols().iter().filter_map(|c| graph.column_name(*c)).map(str::to_owned).collect(),
        selected_rows,
        selected_columns,
    }
}

/// Write the current view as pretty-printed JSON.
pub fn export_view_json(session: &Session, writer: &mut dyn Write) -> Result<()> {
    let snap = snapshot(session);
    serde_json::to_writer_pretty(&mut *writer, &snap)?;
    writeln!(writer)?;
    Ok(())
}

fn column_weights(graph: &BipartiteGraph, b: &Bicluster) -> BTreeMap<String, f64> {
    b.columns()
        .iter()
        .zip(b.column_weights())
        .filter_map(|(c, w)| graph.column_name(*c).map(|n| (n.to_owned(), *w)))
        .collect()
}

fn row_weights(graph: &BipartiteGraph, b: &Bicluster) -> BTreeMap<String, f64> {
    b.rows()
        .iter()
        .zip(b.row_weights())
        .filter_map(|(r, w)| graph.row_name(*r).map(|n| (n.to_owned(), *w)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, Matrix, PrecomputedMiner, SessionConfig};

    fn session() -> Session {
        let m = Matrix::from_bits(&["A", "B"], [("x", &[1u8, 1][..]), ("y", &[0, 1][..])]);
        let miner = PrecomputedMiner::from_names([(vec!["A", "B"], vec!["x", "y"])]);
        Session::open(&m, miner, &SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_snapshot_weights_by_name() {
        let s = session();
        let snap = snapshot(&s);
        assert_eq!(snap.biclusters.len(), 1);
        let b = &snap.biclusters[0];
        assert_eq!(b.index, 0);
        assert_eq!(b.column_weights["A"], 0.5);
        assert_eq!(b.column_weights["B"], 1.0);
        assert_eq!(b.row_weights["x"], 1.0);
        assert_eq!(b.row_weights["y"], 0.5);
        assert!(!b.highlighted);
    }

    #[test]
    fn test_export_reflects_highlight() {
        let mut s = session();
        let a = s.column_id("A").unwrap();
        s.dispatch(Event::HoverColumn(a)).unwrap();

        let mut buf = Vec::new();
        export_view_json(&s, &mut buf).unwrap();
        let snap: ViewSnapshot = serde_json::from_slice(&buf).unwrap();
        assert_eq!(snap.selected_columns, vec!["A"]);
        assert_eq!(snap.selected_rows, vec!["x"]);
        assert!(snap.biclusters[0].highlighted);
    }
}
