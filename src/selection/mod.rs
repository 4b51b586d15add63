//! # Selection Engine
//!
//! Interactive drill-down (filter) and highlight (selection) state, expressed
//! as a reducer `(state, event) → state` over an immutable [`Layout`].
//!
//! | Event | Filter | Highlight |
//! |-------|--------|-----------|
//! | hover edge / bicluster / column / row | unchanged | replaced |
//! | leave * / clear-highlight | unchanged | emptied |
//! | click edge / bicluster / column / row | replaced | emptied |
//! | clear-filter | reset to universe | unchanged |
//!
//! Clicking a column or row keeps every member of every surviving bicluster,
//! not only the vertices joined to the clicked one by an edge.
//! Edge events must name a cell that is an edge of the graph.

pub mod state;
pub mod event;
pub mod engine;

pub use state::SelectionState;
pub use event::Event;
pub use engine::{transition, Layout, SelectionEngine};
