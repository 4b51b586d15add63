//! # Presence Matrix Model
//!
//! Plain data shared by every stage: input records, typed vertex handles and
//! the enriched bicluster record.
//!
//! Design rule: this module is pure data. No I/O, no state, no logging.

pub mod cell;
pub mod matrix;
pub mod vertex;
pub mod bicluster;

pub use cell::Cell;
pub use matrix::{Matrix, Record, NAME_FIELD};
pub use vertex::{BiclusterId, ColumnId, Edge, RowId};
pub use bicluster::Bicluster;
