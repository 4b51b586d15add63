//! Greedy edge-concentration ordering of biclusters.
//!
//! The objective rewards biclusters that re-cover edges already covered by
//! earlier picks, with saturation:
//!
//! ```text
//! score(counter) = Σ_{edges e, n_e > 0} H(n_e)      H(n) = 1 + 1/2 + … + 1/n
//! ```
//!
//! Each step picks the unused bicluster whose edges raise the score the
//! most. Ties go to the lowest id (strict `>`). The selection sequence is
//! then reversed to give the display order.
//!
//! Biclusters without edges cannot raise the score at all. They are kept out
//! of the greedy loop and placed after every other bicluster, in id order.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Bicluster, BiclusterId, Edge};

/// `H(n) = Σ_{i=1..n} 1/i`, with `H(0) = 0`.
pub fn harmonic(n: u32) -> f64 {
    (1..=n).map(|i| 1.0 / i as f64).sum()
}

// ============================================================================
// EdgeCounter
// ============================================================================

/// Multiplicity of every edge key covered by the biclusters picked so far.
#[derive(Debug, Clone, Default)]
pub struct EdgeCounter {
    counts: HashMap<Edge, u32>,
}

impl EdgeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiplicity(&self, edge: &Edge) -> u32 {
        self.counts.get(edge).copied().unwrap_or(0)
    }

    pub fn add(&mut self, edges: &[Edge]) {
        for e in edges {
            *self.counts.entry(*e).or_insert(0) += 1;
        }
    }

    /// Score increase from adding `edges` once each.
    ///
    /// An edge at multiplicity `n` contributes `1/(n+1)`. Contributions are
    /// summed grouped by multiplicity in ascending order, so two edge lists
    /// with the same multiset of multiplicities yield bit-identical gains.
    pub fn gain(&self, edges: &[Edge]) -> f64 {
        let mut by_multiplicity: BTreeMap<u32, u32> = BTreeMap::new();
        for e in edges {
            *by_multiplicity.entry(self.multiplicity(e)).or_insert(0) += 1;
        }
        by_multiplicity
            .into_iter()
            .map(|(n, k)| k as f64 / (n as f64 + 1.0))
            .sum()
    }

    /// Objective recomputed from scratch.
    pub fn score(&self) -> f64 {
        let mut levels: Vec<u32> = self.counts.values().copied().filter(|n| *n > 0).collect();
        levels.sort_unstable();
        levels.into_iter().map(harmonic).sum()
    }

    /// Number of distinct edges covered at least once.
    pub fn covered(&self) -> usize {
        self.counts.values().filter(|n| **n > 0).count()
    }
}

// ============================================================================
// BiclusterOrder
// ============================================================================

/// One greedy pick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreedyStep {
    pub chosen: BiclusterId,
    pub gain: f64,
    /// Cumulative objective after this pick.
    pub score: f64,
}

/// Final bicluster display order and the id → index lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiclusterOrder {
    order: Vec<BiclusterId>,
    index: HashMap<BiclusterId, usize>,
    steps: Vec<GreedyStep>,
}

impl BiclusterOrder {
    fn from_display_order(order: Vec<BiclusterId>, steps: Vec<GreedyStep>) -> Self {
        let index = order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        Self { order, index, steps }
    }

    /// Bicluster ids in display order.
    pub fn order(&self) -> &[BiclusterId] {
        &self.order
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = BiclusterId> + '_ {
        self.order.iter().copied()
    }

    /// Display index of a bicluster.
    pub fn index_of(&self, id: BiclusterId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Greedy picks in selection order (before reversal). Empty biclusters
    /// never appear here.
    pub fn steps(&self) -> &[GreedyStep] {
        &self.steps
    }

    pub fn final_score(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.score)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ============================================================================
// Greedy selection
// ============================================================================

/// Order biclusters for edge concentration.
pub fn greedy_order(biclusters: &[Bicluster]) -> BiclusterOrder {
    let (candidates, degenerate): (Vec<&Bicluster>, Vec<&Bicluster>) =
        biclusters.iter().partition(|b| !b.is_empty());

    let mut counter = EdgeCounter::new();
    let mut used = vec![false; candidates.len()];
    let mut steps = Vec::with_capacity(candidates.len());
    let mut score = 0.0;

    for step in 0..candidates.len() {
        let mut best = 0.0;
        let mut chosen = None;
        for (j, b) in candidates.iter().enumerate() {
            if used[j] {
                continue;
            }
            let gain = counter.gain(b.edges());
            if gain > best {
                best = gain;
                chosen = Some(j);
            }
        }
        // Every remaining candidate has at least one edge, so its gain is > 0.
        let Some(j) = chosen else { break };

        let b = candidates[j];
        counter.add(b.edges());
        used[j] = true;
        score += best;
        tracing::trace!(step, bicluster = %b.id(), gain = best, score, "greedy pick");
        steps.push(GreedyStep { chosen: b.id(), gain: best, score });
    }

    let mut order: Vec<BiclusterId> = steps.iter().rev().map(|s| s.chosen).collect();
    let mut tail: Vec<BiclusterId> = degenerate.iter().map(|b| b.id()).collect();
    tail.sort_unstable();
    order.extend(tail);

    tracing::debug!(
        biclusters = order.len(),
        empty = degenerate.len(),
        score,
        covered = counter.covered(),
        "greedy bicluster order"
    );
    BiclusterOrder::from_display_order(order, steps)
}

// ============================================================================
// Tests
// ============================================================================
