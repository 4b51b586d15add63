//! # Bicluster Miner Contract
//!
//! Quasi-biclique mining is an external collaborator. This module defines
//! the contract between the pipeline and any miner, plus a replaying
//! implementation used for embedding precomputed results and for testing.
//!
//! ## Implementations
//!
//! | Miner | Description |
//! |-------|-------------|
//! | `PrecomputedMiner` | Replays a fixed candidate list |

use serde::{Deserialize, Serialize};

use crate::graph::BipartiteGraph;
use crate::model::{ColumnId, RowId};
use crate::{Error, Result};

// ============================================================================
// Density threshold
// ============================================================================

/// Minimum block density a miner must honor, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct DensityThreshold(f64);

impl DensityThreshold {
    pub fn new(value: f64) -> Result<Self> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidThreshold(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for DensityThreshold {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for DensityThreshold {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let v = f64::deserialize(d)?;
        Self::new(v).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Candidate
// ============================================================================

/// Raw miner output: a column subset (`source`) and a row subset (`target`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub source: Vec<ColumnId>,
    pub target: Vec<RowId>,
}

impl Candidate {
    pub fn new(source: Vec<ColumnId>, target: Vec<RowId>) -> Self {
        Self { source, target }
    }
}

// ============================================================================
// BiclusterMiner trait
// ============================================================================

/// The mining contract.
///
/// The position of each candidate in the returned sequence becomes its
/// stable [`crate::model::BiclusterId`]. No other ordering guarantee is
/// assumed.
pub trait BiclusterMiner {
    fn mine(
        &self,
        graph: &BipartiteGraph,
        columns: &[ColumnId],
        rows: &[RowId],
        threshold: DensityThreshold,
    ) -> Result<Vec<Candidate>>;
}

impl<M: BiclusterMiner + ?Sized> BiclusterMiner for &M {
    fn mine(
        &self,
        graph: &BipartiteGraph,
        columns: &[ColumnId],
        rows: &[RowId],
        threshold: DensityThreshold,
    ) -> Result<Vec<Candidate>> {
        (**self).mine(graph, columns, rows, threshold)
    }
}

// ============================================================================
// PrecomputedMiner
// ============================================================================

enum Source {
    Ids(Vec<Candidate>),
    Names(Vec<(Vec<String>, Vec<String>)>),
}

/// Miner that returns a fixed candidate list regardless of threshold.
pub struct PrecomputedMiner {
    source: Source,
}

impl PrecomputedMiner {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { source: Source::Ids(candidates) }
    }

    /// Candidates given by vertex names, resolved against the graph at mining time.
    pub fn from_names<C, R>(candidates: impl IntoIterator<Item = (C, R)>) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let names = candidates
            .into_iter()
            .map(|(cols, rows)| {
                (
                    cols.into_iter().map(Into::into).collect(),
                    rows.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { source: Source::Names(names) }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl BiclusterMiner for PrecomputedMiner {
    fn mine(
        &self,
        graph: &BipartiteGraph,
        _columns: &[ColumnId],
        _rows: &[RowId],
        _threshold: DensityThreshold,
    ) -> Result<Vec<Candidate>> {
        match &self.source {
            Source::Ids(candidates) => Ok(candidates.clone()),
            Source::Names(names) => names
                .iter()
                .map(|(cols, rows)| {
                    let source = cols
                        .iter()
                        .map(|n| graph.require_column(n))
                        .collect::<Result<Vec<_>>>()?;
                    let target = rows
                        .iter()
                        .map(|n| graph.require_row(n))
                        .collect::<Result<Vec<_>>>()?;
                    Ok(Candidate { source, target })
                })
                .collect::<Result<Vec<_>>>()
                .map_err(|e| Error::MiningError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Matrix;

    #[test]
    fn test_threshold_bounds() {
        assert!(DensityThreshold::new(0.8).is_ok());
        assert!(DensityThreshold::new(1.0).is_ok());
        assert!(matches!(DensityThreshold::new(0.0), Err(Error::InvalidThreshold(_))));
        assert!(matches!(DensityThreshold::new(1.5), Err(Error::InvalidThreshold(_))));
        assert!(DensityThreshold::new(f64::NAN).is_err());
    }

    #[test]
    fn test_threshold_deserialize_validates() {
        let ok: DensityThreshold = serde_json::from_str("0.5").unwrap();
        assert_eq!(ok.get(), 0.5);
        assert!(serde_json::from_str::<DensityThreshold>("2.0").is_err());
    }

    #[test]
    fn test_named_candidates_resolve() {
        let m = Matrix::from_bits(&["A", "B"], [("x", &[1u8, 1][..]), ("y", &[0, 1][..])]);
        let g = BipartiteGraph::from_matrix(&m).unwrap();
        let miner = PrecomputedMiner::from_names([(vec!["B"], vec!["x", "y"])]);
        let t = DensityThreshold::new(0.8).unwrap();

        let out = miner.mine(&g, &[], &[], t).unwrap();
        assert_eq!(out, vec![Candidate::new(vec![ColumnId(1)], vec![RowId(0), RowId(1)])]);

        let bad = PrecomputedMiner::from_names([(vec!["Z"], Vec::<&str>::new())]);
        assert!(matches!(bad.mine(&g, &[], &[], t), Err(Error::MiningError(_))));
    }
}
