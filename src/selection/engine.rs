//! The selection reducer.
//!
//! `transition(layout, state, event)` is a pure function: it reads the
//! immutable [`Layout`] and the prior state and returns the next state.
//! Nothing is mutated in place.

use hashbrown::HashSet;

use crate::config::ReferencePolicy;
use crate::graph::BipartiteGraph;
use crate::model::{Bicluster, BiclusterId, ColumnId, RowId};
use crate::order::{axis_order, greedy_order, AxisOrder, BiclusterOrder};
use crate::{Error, Result};

use super::{Event, SelectionState};

// ============================================================================
// Layout
// ============================================================================

/// Everything the reducer reads: graph, biclusters and both display orders.
/// Built once per session.
#[derive(Debug, Clone)]
pub struct Layout {
    graph: BipartiteGraph,
    biclusters: Vec<Bicluster>,
    order: BiclusterOrder,
    axes: AxisOrder,
}

impl Layout {
    /// Order the enriched biclusters and derive both axes.
    ///
    /// `biclusters` must be the enrichment output for `graph`: the bicluster
    /// at position `i` has id `i` and every member is a vertex of `graph`.
    pub fn new(graph: BipartiteGraph, biclusters: Vec<Bicluster>) -> Result<Self> {
        if let Some((i, b)) = biclusters.iter().enumerate().find(|(i, b)| b.id().index() != *i) {
            return Err(Error::InvalidInput(format!(
                "bicluster at position {i} carries id {}",
                b.id()
            )));
        }
        for b in &biclusters {
            if let Some(c) = b.columns().iter().find(|c| !graph.contains_column(**c)) {
                return Err(Error::InvalidReference(format!(
                    "bicluster {} names column {c} outside the graph",
                    b.id()
                )));
            }
            if let Some(r) = b.rows().iter().find(|r| !graph.contains_row(**r)) {
                return Err(Error::InvalidReference(format!(
                    "bicluster {} names row {r} outside the graph",
                    b.id()
                )));
            }
        }
        let order = greedy_order(&biclusters);
        let axes = axis_order(&graph, &biclusters, &order);
        Ok(Self { graph, biclusters, order, axes })
    }

    pub fn graph(&self) -> &BipartiteGraph {
        &self.graph
    }

    /// All biclusters, indexed by id.
    pub fn biclusters(&self) -> &[Bicluster] {
        &self.biclusters
    }

    pub fn bicluster(&self, id: BiclusterId) -> Option<&Bicluster> {
        self.biclusters.get(id.index())
    }

    pub fn bicluster_order(&self) -> &BiclusterOrder {
        &self.order
    }

    pub fn axis_order(&self) -> &AxisOrder {
        &self.axes
    }

    /// Biclusters in display order.
    pub fn ordered_biclusters(&self) -> impl Iterator<Item = &Bicluster> + '_ {
        self.order.iter().filter_map(|id| self.bicluster(id))
    }

    /// Filters showing everything, no highlight.
    pub fn initial_state(&self) -> SelectionState {
        SelectionState {
            filtered_biclusters: self.order.order().to_vec(),
            filtered_rows: self.axes.rows().to_vec(),
            filtered_cols: self.axes.columns().to_vec(),
            ..SelectionState::default()
        }
    }

    /// Rows and columns belonging to at least one of `survivors`, in axis order.
    fn members(&self, survivors: &[BiclusterId]) -> (Vec<RowId>, Vec<ColumnId>) {
        let blocks: Vec<&Bicluster> = survivors.iter().filter_map(|id| self.bicluster(*id)).collect();
        let rows = self
            .axes
            .rows()
            .iter()
            .copied()
            .filter(|r| blocks.iter().any(|b| b.has_row(*r)))
            .collect();
        let cols = self
            .axes
            .columns()
            .iter()
            .copied()
            .filter(|c| blocks.iter().any(|b| b.has_column(*c)))
            .collect();
        (rows, cols)
    }

    /// Ids of every bicluster in the full universe matching `pred`.
    fn universe_where(&self, pred: impl Fn(&Bicluster) -> bool) -> HashSet<BiclusterId> {
        self.ordered_biclusters().filter(|b| pred(b)).map(|b| b.id()).collect()
    }
}

// ============================================================================
// Reference validation
// ============================================================================

fn check_row(layout: &Layout, state: &SelectionState, row: RowId) -> Result<()> {
    if layout.graph.contains_row(row) && state.filtered_rows.contains(&row) {
        Ok(())
    } else {
        Err(Error::InvalidReference(format!("row {row} is not in the current view")))
    }
}

fn check_column(layout: &Layout, state: &SelectionState, column: ColumnId) -> Result<()> {
    if layout.graph.contains_column(column) && state.filtered_cols.contains(&column) {
        Ok(())
    } else {
        Err(Error::InvalidReference(format!("column {column} is not in the current view")))
    }
}

/// The cell must be a drawn edge of the current view.
fn check_edge(layout: &Layout, state: &SelectionState, row: RowId, column: ColumnId) -> Result<()> {
    check_row(layout, state, row)?;
    check_column(layout, state, column)?;
    if layout.graph.has_edge(column, row) {
        Ok(())
    } else {
        Err(Error::InvalidReference(format!("no edge between {column} and {row}")))
    }
}

fn check_bicluster<'a>(
    layout: &'a Layout,
    state: &SelectionState,
    id: BiclusterId,
) -> Result<&'a Bicluster> {
    match layout.bicluster(id) {
        Some(b) if state.filtered_biclusters.contains(&id) => Ok(b),
        _ => Err(Error::InvalidReference(format!("bicluster {id} is not in the current view"))),
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Apply one event. Stale or unknown references fail with
/// [`Error::InvalidReference`] and leave no trace.
pub fn transition(layout: &Layout, state: &SelectionState, event: &Event) -> Result<SelectionState> {
    let next = match *event {
        Event::LeaveEdge
        | Event::LeaveBicluster
        | Event::LeaveColumn
        | Event::LeaveRow
        | Event::ClearHighlight => state.without_selection(),

        Event::ClearFilter => SelectionState {
            selected_biclusters: state.selected_biclusters.clone(),
            selected_rows: state.selected_rows.clone(),
            selected_cols: state.selected_cols.clone(),
            ..layout.initial_state()
        },

        Event::HoverEdge { row, column } => {
            check_edge(layout, state, row, column)?;
            state.with_selection(
                layout.universe_where(|b| b.contains(column, row)),
                HashSet::from_iter([row]),
                HashSet::from_iter([column]),
            )
        }

        Event::ClickEdge { row, column } => {
            check_edge(layout, state, row, column)?;
            narrow(layout, state, |b| b.contains(column, row))
        }

        Event::HoverBicluster(id) => {
            let b = check_bicluster(layout, state, id)?;
            state.with_selection(
                HashSet::from_iter([id]),
                b.rows().iter().copied().collect(),
                b.columns().iter().copied().collect(),
            )
        }

        Event::ClickBicluster(id) => {
            check_bicluster(layout, state, id)?;
            let survivors = vec![id];
            let (rows, cols) = layout.members(&survivors);
            SelectionState {
                filtered_biclusters: survivors,
                filtered_rows: rows,
                filtered_cols: cols,
                ..SelectionState::default()
            }
        }

        Event::HoverColumn(column) => {
            check_column(layout, state, column)?;
            let hit = layout.universe_where(|b| b.has_column(column));
            let rows = layout
                .ordered_biclusters()
                .filter(|b| hit.contains(&b.id()))
                .flat_map(|b| b.rows().iter().copied())
                .filter(|r| layout.graph.has_edge(column, *r))
                .collect();
            state.with_selection(hit, rows, HashSet::from_iter([column]))
        }

        Event::ClickColumn(column) => {
            check_column(layout, state, column)?;
            narrow(layout, state, |b| b.has_column(column))
        }

        Event::HoverRow(row) => {
            check_row(layout, state, row)?;
            let hit = layout.universe_where(|b| b.has_row(row));
            let cols = layout
                .ordered_biclusters()
                .filter(|b| hit.contains(&b.id()))
                .flat_map(|b| b.columns().iter().copied())
                .filter(|c| layout.graph.has_edge(*c, row))
                .collect();
            state.with_selection(hit, HashSet::from_iter([row]), cols)
        }

        Event::ClickRow(row) => {
            check_row(layout, state, row)?;
            narrow(layout, state, |b| b.has_row(row))
        }
    };
    Ok(next)
}

/// Keep the currently filtered biclusters matching `pred`; rows and columns
/// become every member of a survivor. Clears the highlight.
fn narrow(layout: &Layout, state: &SelectionState, pred: impl Fn(&Bicluster) -> bool) -> SelectionState {
    let survivors: Vec<BiclusterId> = state
        .filtered_biclusters
        .iter()
        .copied()
        .filter(|id| layout.bicluster(*id).is_some_and(&pred))
        .collect();
    let (rows, cols) = layout.members(&survivors);
    SelectionState {
        filtered_biclusters: survivors,
        filtered_rows: rows,
        filtered_cols: cols,
        ..SelectionState::default()
    }
}

// ============================================================================
// SelectionEngine
// ============================================================================

/// The reducer plus the policy for stale references.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionEngine {
    policy: ReferencePolicy,
}

impl SelectionEngine {
    pub fn new(policy: ReferencePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ReferencePolicy {
        self.policy
    }

    /// Apply `event`. Under [`ReferencePolicy::Lenient`] a stale reference is a
    /// no-op returning the prior state unchanged.
    pub fn apply(&self, layout: &Layout, state: &SelectionState, event: &Event) -> Result<SelectionState> {
        match transition(layout, state, event) {
            Err(Error::InvalidReference(msg)) if self.policy == ReferencePolicy::Lenient => {
                tracing::warn!(event = %event, reason = %msg, "ignoring event with stale reference");
                Ok(state.clone())
            }
            other => other,
        }
    }
}
