//! Matrix cell value and its presence coercion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of the input presence matrix.
///
/// Records arrive loosely typed (numbers, booleans, numeric strings from a
/// CSV reader), so a cell keeps whatever it was given and is coerced to
/// presence only when the graph is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Cell {
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Null => "NULL",
            Cell::Bool(_) => "BOOLEAN",
            Cell::Int(_) => "INTEGER",
            Cell::Float(_) => "FLOAT",
            Cell::String(_) => "STRING",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Cell::Null) }

    /// Numeric value of the cell, `None` when it does not coerce to a number.
    ///
    /// Strings are trimmed first; the empty string coerces to `0`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Null => Some(0.0),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) if f.is_nan() => None,
            Cell::Float(f) => Some(*f),
            Cell::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(0.0)
                } else {
                    s.parse::<f64>().ok().filter(|v| !v.is_nan())
                }
            }
        }
    }

    /// Numeric truthiness: a cell marks an edge iff it coerces to a non-zero number.
    pub fn is_truthy(&self) -> bool {
        self.as_number().is_some_and(|v| v != 0.0)
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Cell { fn from(v: bool) -> Self { Cell::Bool(v) } }
impl From<i32> for Cell { fn from(v: i32) -> Self { Cell::Int(v as i64) } }
impl From<i64> for Cell { fn from(v: i64) -> Self { Cell::Int(v) } }
impl From<f64> for Cell { fn from(v: f64) -> Self { Cell::Float(v) } }
impl From<String> for Cell { fn from(v: String) -> Self { Cell::String(v) } }
impl From<&str> for Cell { fn from(v: &str) -> Self { Cell::String(v.to_owned()) } }
impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Cell::Null) }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "null"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
        }
    }
}
