//! Typed vertex and bicluster handles.
//!
//! Columns and rows live in separate id spaces, so a row and a column that
//! happen to share a name never compare equal.

use serde::{Deserialize, Serialize};

/// Column vertex handle (position in the matrix's column list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnId(pub u32);

/// Row vertex handle (position in the matrix's record list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u32);

/// Stable bicluster identity: position in the miner's candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BiclusterId(pub u32);

/// Directed presence edge, column → row.
pub type Edge = (ColumnId, RowId);

impl ColumnId {
    pub fn index(self) -> usize { self.0 as usize }
}

impl RowId {
    pub fn index(self) -> usize { self.0 as usize }
}

impl BiclusterId {
    pub fn index(self) -> usize { self.0 as usize }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl std::fmt::Display for BiclusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b{}", self.0)
    }
}
