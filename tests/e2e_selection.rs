//! End-to-end tests for the filter / highlight state machine.
//!
//! Each test opens a `Session` over a small staircase matrix and drives it
//! with `Session::dispatch()`.

use std::cell::RefCell;
use std::rc::Rc;

use bicluster_rs::{
    BiclusterId, Candidate, ColumnId, Error, Event, Matrix, PrecomputedMiner, ReferencePolicy, RowId,
    Session, SessionConfig,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helper: staircase matrix and five biclusters.
//
//        A B C D E
//   r0   1 1 . . .
//   r1   1 1 1 . .
//   r2   . 1 1 1 .
//   r3   . . 1 1 .
//   r4   . . . . .
//
// Display order of biclusters: b1, b0, b2, b4, b3
// Row axis:    r1, r2, r0, r3, r4
// Column axis: B, C, A, D, E
// ============================================================================

const A: ColumnId = ColumnId(0);
const B: ColumnId = ColumnId(1);
const C: ColumnId = ColumnId(2);
const D: ColumnId = ColumnId(3);
const E: ColumnId = ColumnId(4);
const R0: RowId = RowId(0);
const R1: RowId = RowId(1);
const R2: RowId = RowId(2);
const R3: RowId = RowId(3);
const R4: RowId = RowId(4);

fn b(i: u32) -> BiclusterId {
    BiclusterId(i)
}

fn cand(cols: &[ColumnId], rows: &[RowId]) -> Candidate {
    Candidate::new(cols.to_vec(), rows.to_vec())
}

fn open(policy: ReferencePolicy) -> Session {
    let m = Matrix::from_bits(
        &["A", "B", "C", "D", "E"],
        [
            ("r0", &[1u8, 1, 0, 0, 0][..]),
            ("r1", &[1, 1, 1, 0, 0][..]),
            ("r2", &[0, 1, 1, 1, 0][..]),
            ("r3", &[0, 0, 1, 1, 0][..]),
            ("r4", &[0, 0, 0, 0, 0][..]),
        ],
    );
    let miner = PrecomputedMiner::new(vec![
        cand(&[A, B], &[R0, R1]),
        cand(&[B, C], &[R1, R2]),
        cand(&[C, D], &[R2, R3]),
        cand(&[E], &[R4]),
        cand(&[A, B, C], &[R0, R1, R2]),
    ]);
    let cfg = SessionConfig::default().with_reference_policy(policy);
    Session::open(&m, miner, &cfg).unwrap()
}

fn session() -> Session {
    open(ReferencePolicy::Strict)
}

fn sorted<T: Ord + Copy>(set: &hashbrown::HashSet<T>) -> Vec<T> {
    let mut v: Vec<T> = set.iter().copied().collect();
    v.sort();
    v
}

// ============================================================================
// 1. Initial state shows the whole universe in display order
// ============================================================================

#[test]
fn test_initial_state() {
    let s = session();
    let state = s.state();
    assert_eq!(state.filtered_biclusters(), &[b(1), b(0), b(2), b(4), b(3)]);
    assert_eq!(state.filtered_rows(), &[R1, R2, R0, R3, R4]);
    assert_eq!(state.filtered_cols(), &[B, C, A, D, E]);
    assert!(!state.has_selection());
}

// ============================================================================
// 2. Hover edge highlights every bicluster covering the cell
// ============================================================================

#[test]
fn test_hover_edge() {
    let mut s = session();
    let before = s.state().clone();
    let state = s.dispatch(Event::HoverEdge { row: R2, column: C }).unwrap().clone();

    assert_eq!(sorted(state.selected_biclusters()), vec![b(1), b(2), b(4)]);
    assert_eq!(sorted(state.selected_rows()), vec![R2]);
    assert_eq!(sorted(state.selected_cols()), vec![C]);
    assert_eq!(state.filtered_biclusters(), before.filtered_biclusters());
    assert_eq!(state.filtered_rows(), before.filtered_rows());
}

// ============================================================================
// 3. Every leave event empties the highlight and keeps the filter
// ============================================================================

#[test]
fn test_leave_events_clear_highlight() {
    for leave in [
        Event::LeaveEdge,
        Event::LeaveBicluster,
        Event::LeaveColumn,
        Event::LeaveRow,
        Event::ClearHighlight,
    ] {
        let mut s = session();
        s.dispatch(Event::ClickColumn(D)).unwrap();
        let filtered = s.state().filtered_biclusters().to_vec();
        s.dispatch(Event::HoverBicluster(b(2))).unwrap();
        assert!(s.state().has_selection());

        let state = s.dispatch(leave).unwrap();
        assert!(!state.has_selection(), "{leave} should clear the highlight");
        assert_eq!(state.filtered_biclusters(), &filtered[..]);
    }
}

// ============================================================================
// 4. Click edge narrows the current filter to biclusters covering the cell
// ============================================================================

#[test]
fn test_click_edge() {
    let mut s = session();
    s.dispatch(Event::HoverRow(R1)).unwrap();
    let state = s.dispatch(Event::ClickEdge { row: R1, column: B }).unwrap();

    assert_eq!(state.filtered_biclusters(), &[b(1), b(0), b(4)]);
    assert_eq!(state.filtered_rows(), &[R1, R2, R0]);
    assert_eq!(state.filtered_cols(), &[B, C, A]);
    assert!(!state.has_selection());
}

#[test]
fn test_click_edge_restricts_current_filter_not_universe() {
    let mut s = session();
    s.dispatch(Event::ClickColumn(D)).unwrap();
    assert_eq!(s.state().filtered_biclusters(), &[b(2)]);

    // b1 and b4 also cover (C, r2) but are already filtered out
    let state = s.dispatch(Event::ClickEdge { row: R2, column: C }).unwrap();
    assert_eq!(state.filtered_biclusters(), &[b(2)]);
    assert_eq!(state.filtered_rows(), &[R2, R3]);
    assert_eq!(state.filtered_cols(), &[C, D]);
}

// ============================================================================
// 5. Hover / click bicluster
// ============================================================================

#[test]
fn test_hover_bicluster() {
    let mut s = session();
    let state = s.dispatch(Event::HoverBicluster(b(2))).unwrap();
    assert_eq!(sorted(state.selected_biclusters()), vec![b(2)]);
    assert_eq!(sorted(state.selected_rows()), vec![R2, R3]);
    assert_eq!(sorted(state.selected_cols()), vec![C, D]);
}

#[test]
fn test_click_bicluster_then_clear_filter() {
    let mut s = session();
    let initial = s.state().clone();

    let state = s.dispatch(Event::ClickBicluster(b(4))).unwrap();
    assert_eq!(state.filtered_biclusters(), &[b(4)]);
    assert_eq!(state.filtered_rows(), &[R1, R2, R0]);
    assert_eq!(state.filtered_cols(), &[B, C, A]);

    let state = s.dispatch(Event::ClearFilter).unwrap();
    assert_eq!(state.filtered_biclusters(), &[b(1), b(0), b(2), b(4), b(3)]);
    assert_eq!(state, &initial);
}

// ============================================================================
// 6. Hover column: only rows with an actual edge to the column
// ============================================================================

#[test]
fn test_hover_column() {
    let mut s = session();
    let state = s.dispatch(Event::HoverColumn(A)).unwrap();
    // b0 and b4 hold A; b4 also holds r2, which has no edge to A
    assert_eq!(sorted(state.selected_biclusters()), vec![b(0), b(4)]);
    assert_eq!(sorted(state.selected_rows()), vec![R0, R1]);
    assert_eq!(sorted(state.selected_cols()), vec![A]);
}

// ============================================================================
// 7. Click column keeps every member of every surviving bicluster
// ============================================================================

#[test]
fn test_click_column_widens_to_membership() {
    let mut s = session();
    let state = s.dispatch(Event::ClickColumn(A)).unwrap();
    assert_eq!(state.filtered_biclusters(), &[b(0), b(4)]);
    // r2 has no edge to A but is a member of b4
    assert_eq!(state.filtered_rows(), &[R1, R2, R0]);
    assert_eq!(state.filtered_cols(), &[B, C, A]);
    assert!(!state.has_selection());
}

// ============================================================================
// 8. Rows mirror columns
// ============================================================================

#[test]
fn test_hover_row() {
    let mut s = session();
    let state = s.dispatch(Event::HoverRow(R2)).unwrap();
    assert_eq!(sorted(state.selected_biclusters()), vec![b(1), b(2), b(4)]);
    // A belongs to b4 but has no edge to r2
    assert_eq!(sorted(state.selected_cols()), vec![B, C, D]);
    assert_eq!(sorted(state.selected_rows()), vec![R2]);
}

#[test]
fn test_click_row() {
    let mut s = session();
    let state = s.dispatch(Event::ClickRow(R0)).unwrap();
    assert_eq!(state.filtered_biclusters(), &[b(0), b(4)]);
    assert_eq!(state.filtered_rows(), &[R1, R2, R0]);
    assert_eq!(state.filtered_cols(), &[B, C, A]);
}

#[test]
fn test_successive_clicks_compound() {
    let mut s = session();
    s.dispatch(Event::ClickRow(R2)).unwrap();
    assert_eq!(s.state().filtered_biclusters(), &[b(1), b(2), b(4)]);
    let state = s.dispatch(Event::ClickColumn(D)).unwrap();
    assert_eq!(state.filtered_biclusters(), &[b(2)]);
}

// ============================================================================
// 9. Idempotence
// ============================================================================

#[test]
fn test_clear_highlight_idempotent() {
    let mut s = session();
    s.dispatch(Event::HoverColumn(B)).unwrap();
    let once = s.dispatch(Event::ClearHighlight).unwrap().clone();
    let twice = s.dispatch(Event::ClearHighlight).unwrap().clone();
    assert_eq!(once, twice);
}

#[test]
fn test_clear_filter_when_unfiltered_is_noop() {
    let mut s = session();
    s.dispatch(Event::HoverRow(R3)).unwrap();
    let before = s.state().clone();
    let after = s.dispatch(Event::ClearFilter).unwrap();
    assert_eq!(after, &before);
}

#[test]
fn test_clear_filter_keeps_highlight() {
    let mut s = session();
    s.dispatch(Event::ClickBicluster(b(2))).unwrap();
    s.dispatch(Event::HoverBicluster(b(2))).unwrap();
    let state = s.dispatch(Event::ClearFilter).unwrap();
    assert_eq!(state.filtered_biclusters().len(), 5);
    assert_eq!(sorted(state.selected_biclusters()), vec![b(2)]);
}

// ============================================================================
// 10. Stale references
// ============================================================================

#[test]
fn test_strict_rejects_stale_reference() {
    let mut s = session();
    s.dispatch(Event::ClickBicluster(b(2))).unwrap();
    let before = s.state().clone();

    assert!(matches!(s.dispatch(Event::HoverRow(R0)), Err(Error::InvalidReference(_))));
    assert!(matches!(s.dispatch(Event::HoverBicluster(b(0))), Err(Error::InvalidReference(_))));
    assert!(matches!(
        s.dispatch(Event::ClickEdge { row: R2, column: A }),
        Err(Error::InvalidReference(_))
    ));
    assert!(matches!(s.dispatch(Event::ClickColumn(ColumnId(99))), Err(Error::InvalidReference(_))));
    assert!(matches!(s.dispatch(Event::ClickBicluster(b(99))), Err(Error::InvalidReference(_))));
    assert_eq!(s.state(), &before);
}

#[test]
fn test_edge_events_require_a_present_cell() {
    let mut s = session();
    // r0 and C are both displayed, but the cell is empty
    let before = s.state().clone();
    assert!(matches!(
        s.dispatch(Event::HoverEdge { row: R0, column: C }),
        Err(Error::InvalidReference(_))
    ));
    assert!(matches!(
        s.dispatch(Event::ClickEdge { row: R4, column: E }),
        Err(Error::InvalidReference(_))
    ));
    assert_eq!(s.state(), &before);

    let mut lenient = open(ReferencePolicy::Lenient);
    let before = lenient.state().clone();
    assert_eq!(lenient.dispatch(Event::ClickEdge { row: R0, column: D }).unwrap(), &before);
}

#[test]
fn test_lenient_ignores_stale_reference() {
    let mut s = open(ReferencePolicy::Lenient);
    s.dispatch(Event::ClickBicluster(b(2))).unwrap();
    let before = s.state().clone();

    assert_eq!(s.dispatch(Event::HoverRow(R0)).unwrap(), &before);
    assert_eq!(s.dispatch(Event::ClickBicluster(b(99))).unwrap(), &before);
}

// ============================================================================
// 11. Subscribers see every change, and only changes
// ============================================================================

#[test]
fn test_subscribers() {
    let mut s = session();
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let log = Rc::clone(&seen);
    s.subscribe(move |state, event| {
        log.borrow_mut().push(format!("{}:{}", event.name(), state.filtered_biclusters().len()));
    });

    s.dispatch(Event::ClearHighlight).unwrap(); // nothing to clear
    s.dispatch(Event::HoverColumn(D)).unwrap();
    s.dispatch(Event::ClickColumn(D)).unwrap();
    s.dispatch(Event::ClearFilter).unwrap();
    s.dispatch(Event::ClearFilter).unwrap(); // already unfiltered

    assert_eq!(
        *seen.borrow(),
        vec!["hover_column:5", "click_column:1", "clear_filter:5"]
    );
}
