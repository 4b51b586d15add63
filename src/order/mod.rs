//! Display ordering: biclusters first, then both matrix axes.
//!
//! Both orders are computed once per session and never recomputed
//! reactively.

pub mod greedy;
pub mod axis;

pub use greedy::{greedy_order, harmonic, BiclusterOrder, EdgeCounter, GreedyStep};
pub use axis::{axis_order, AxisOrder};
