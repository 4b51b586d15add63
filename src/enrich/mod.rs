//! Bicluster enrichment: raw miner candidates → immutable [`Bicluster`] records.
//!
//! For every candidate this attaches the in-block edge list and the
//! per-member connectivity weights. Weights are measured against the full
//! graph, so an approximate block can still report a weight of `1.0` for a
//! member that is connected to every other-side member.

use hashbrown::HashSet;

use crate::graph::{handle, BipartiteGraph};
use crate::mining::Candidate;
use crate::model::{Bicluster, BiclusterId, ColumnId, Edge, RowId};
use crate::{Error, Result};

/// Enrich candidates in order. The `i`-th candidate becomes `BiclusterId(i)`.
pub fn enrich(graph: &BipartiteGraph, candidates: &[Candidate]) -> Result<Vec<Bicluster>> {
    let biclusters = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| enrich_one(graph, BiclusterId(handle(i, "bicluster")?), c))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        biclusters = biclusters.len(),
        edges = biclusters.iter().map(Bicluster::edge_count).sum::<usize>(),
        "enriched bicluster candidates"
    );
    Ok(biclusters)
}

fn enrich_one(graph: &BipartiteGraph, id: BiclusterId, candidate: &Candidate) -> Result<Bicluster> {
    let columns = dedup(&candidate.source);
    let rows = dedup(&candidate.target);

    if let Some(c) = columns.iter().find(|c| !graph.contains_column(**c)) {
        return Err(Error::InvalidReference(format!("bicluster {id} names unknown column {c}")));
    }
    if let Some(r) = rows.iter().find(|r| !graph.contains_row(**r)) {
        return Err(Error::InvalidReference(format!("bicluster {id} names unknown row {r}")));
    }

    let edges: Vec<Edge> = columns
        .iter()
        .flat_map(|&c| rows.iter().map(move |&r| (c, r)))
        .filter(|&(c, r)| graph.has_edge(c, r))
        .collect();

    let row_set: HashSet<RowId> = rows.iter().copied().collect();
    let column_set: HashSet<ColumnId> = columns.iter().copied().collect();

    let column_weights = columns
        .iter()
        .map(|&c| {
            let hits = graph.out_neighbors(c).iter().filter(|r| row_set.contains(*r)).count();
            fraction(hits, rows.len())
        })
        .collect();
    let row_weights = rows
        .iter()
        .map(|&r| {
            let hits = graph.in_neighbors(r).iter().filter(|c| column_set.contains(*c)).count();
            fraction(hits, columns.len())
        })
        .collect();

    Ok(Bicluster::new(id, columns, rows, edges, column_weights, row_weights))
}

/// `hits / total`, or `0.0` for an empty other side.
fn fraction(hits: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { hits as f64 / total as f64 }
}

/// Drop repeated members, keeping the first occurrence.
fn dedup<T: Copy + Eq + std::hash::Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().copied().filter(|x| seen.insert(*x)).collect()
}

// ============================================================================
// Tests
// ============================================================================
