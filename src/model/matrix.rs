//! Input presence matrix: named records over an ordered column list.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::Cell;

/// Reserved record key carrying the row identity.
pub const NAME_FIELD: &str = "name";

/// One matrix row.
///
/// Deserializes from a flat object such as `{"name": "x", "A": 1, "B": "0"}`:
/// `name` is the row identity and every other key is a column cell. Cells
/// keep their input key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(flatten)]
    pub cells: IndexMap<String, Cell>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), cells: IndexMap::new() }
    }

    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Presence of `column` in this row. Missing cells are absent.
    pub fn is_present(&self, column: &str) -> bool {
        self.cells.get(column).is_some_and(Cell::is_truthy)
    }
}

/// Row-major presence table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    /// Column names in display-input order.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Matrix {
    pub fn new(
        columns: impl IntoIterator<Item = impl Into<String>>,
        records: Vec<Record>,
    ) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            records,
        }
    }

    /// Build a matrix whose columns are the union of all record keys, in the
    /// order each key is first seen.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns: IndexSet<&str> = records
            .iter()
            .flat_map(|r| r.cells.keys().map(String::as_str))
            .filter(|k| *k != NAME_FIELD)
            .collect();
        let columns: Vec<String> = columns.into_iter().map(str::to_owned).collect();
        Self { columns, records }
    }

    /// Parse a JSON array of flat records (see [`Record`]).
    pub fn from_json_records(json: &str) -> crate::Result<Self> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Build a matrix from literal rows of 0/1 flags, one flag per column.
    pub fn from_bits<'a>(
        columns: &[&str],
        rows: impl IntoIterator<Item = (&'a str, &'a [u8])>,
    ) -> Self {
        let records = rows
            .into_iter()
            .map(|(name, bits)| {
                columns
                    .iter()
                    .zip(bits)
                    .fold(Record::new(name), |rec, (col, bit)| rec.with_cell(*col, *bit as i64))
            })
            .collect();
        Self::new(columns.iter().copied(), records)
    }

    pub fn row_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }
}
