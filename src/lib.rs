//! # bicluster-rs: edge-concentration views over presence matrices
//!
//! Explores a binary row × column matrix through overlapping dense blocks
//! ("biclusters") of its bipartite graph: the blocks are enriched, ordered
//! so that blocks sharing edges sit next to each other, and then browsed
//! through a drill-down / highlight state machine.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `BiclusterMiner` is the contract with the external miner
//! 2. **Typed handles**: `ColumnId`, `RowId`, `BiclusterId` resolved once
//! 3. **Immutable records**: a `Bicluster` is built once and never widened
//! 4. **Reducer**: every view change is `(state, event) → state`
//!
//! ## Quick Start
//!
//! ```rust
//! use bicluster_rs::{Event, Matrix, PrecomputedMiner, Session, SessionConfig};
//!
//! # fn example() -> bicluster_rs::Result<()> {
//! let matrix = Matrix::from_bits(
//!     &["A", "B", "C"],
//!     [("x", &[1u8, 0, 0][..]), ("y", &[1, 1, 0][..]), ("z", &[0, 1, 0][..])],
//! );
//! let miner = PrecomputedMiner::from_names([(vec!["A", "B"], vec!["x", "y", "z"])]);
//! let mut session = Session::open(&matrix, miner, &SessionConfig::default())?;
//!
//! let b = session.column_id("B")?;
//! let state = session.dispatch(Event::HoverColumn(b))?;
//! assert_eq!(state.selected_rows().len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Runs |
//! |-------|--------|------|
//! | Presence graph | `graph` | once |
//! | Mining | `mining` (external) | once |
//! | Enrichment | `enrich` | once |
//! | Bicluster + axis order | `order` | once |
//! | Filter / highlight | `selection` | per event |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod mining;
pub mod enrich;
pub mod order;
pub mod selection;
pub mod config;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Bicluster, BiclusterId, Cell, ColumnId, Edge, Matrix, Record, RowId,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use graph::BipartiteGraph;
pub use mining::{BiclusterMiner, Candidate, DensityThreshold, PrecomputedMiner};
pub use order::{AxisOrder, BiclusterOrder, GreedyStep};
pub use selection::{Event, Layout, SelectionEngine, SelectionState};
pub use config::{ReferencePolicy, SessionConfig};

// ============================================================================
// Top-level Session handle
// ============================================================================

type Subscriber = Box<dyn FnMut(&SelectionState, &Event)>;

/// The primary entry point. A `Session` runs the load-time pipeline once and
/// then owns the single view state, replacing it on every event.
pub struct Session {
    layout: Layout,
    engine: SelectionEngine,
    state: SelectionState,
    subscribers: Vec<Subscriber>,
}

impl Session {
    /// Build graph, mine, enrich and order; start with everything shown and
    /// nothing highlighted.
    pub fn open<M: BiclusterMiner>(matrix: &Matrix, miner: M, config: &SessionConfig) -> Result<Self> {
        let threshold = config.threshold()?;

        // Phase 1: Graph
        let graph = BipartiteGraph::from_matrix(matrix)?;

        // Phase 2: Mine
        let columns: Vec<ColumnId> = graph.columns().collect();
        let rows: Vec<RowId> = graph.rows().collect();
        let candidates = miner.mine(&graph, &columns, &rows, threshold)?;

        // Phase 3: Enrich
        let biclusters = enrich::enrich(&graph, &candidates)?;

        // Phase 4: Order
        let layout = Layout::new(graph, biclusters)?;

        tracing::info!(
            columns = layout.graph().column_count(),
            rows = layout.graph().row_count(),
            edges = layout.graph().edge_count(),
            biclusters = layout.biclusters().len(),
            threshold = threshold.get(),
            "session opened"
        );
        Ok(Self::with_layout(layout, SelectionEngine::new(config.reference_policy)))
    }

    /// Start a session over an already built layout.
    pub fn with_layout(layout: Layout, engine: SelectionEngine) -> Self {
        let state = layout.initial_state();
        Self { layout, engine, state, subscribers: Vec::new() }
    }

    /// Apply one event, replace the state, notify subscribers if it changed.
    ///
    /// On error the prior state is kept.
    pub fn dispatch(&mut self, event: Event) -> Result<&SelectionState> {
        let next = self.engine.apply(&self.layout, &self.state, &event)?;
        tracing::trace!(event = %event, "dispatch");
        if next != self.state {
            self.state = next;
            for subscriber in &mut self.subscribers {
                subscriber(&self.state, &event);
            }
        }
        Ok(&self.state)
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&mut self, f: impl FnMut(&SelectionState, &Event) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn graph(&self) -> &BipartiteGraph {
        self.layout.graph()
    }

    pub fn biclusters(&self) -> &[Bicluster] {
        self.layout.biclusters()
    }

    pub fn bicluster(&self, id: BiclusterId) -> Option<&Bicluster> {
        self.layout.bicluster(id)
    }

    pub fn bicluster_order(&self) -> &BiclusterOrder {
        self.layout.bicluster_order()
    }

    pub fn axis_order(&self) -> &AxisOrder {
        self.layout.axis_order()
    }

    pub fn column_id(&self, name: &str) -> Result<ColumnId> {
        self.graph().require_column(name)
    }

    pub fn row_id(&self, name: &str) -> Result<RowId> {
        self.graph().require_row(name)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("biclusters", &self.layout.biclusters().len())
            .field("engine", &self.engine)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Density threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Mining error: {0}")]
    MiningError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
