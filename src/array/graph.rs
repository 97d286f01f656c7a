//! Computation-graph nodes behind a lazy array
//!
//! A node describes how to produce blocks; nothing runs until a block is
//! requested during evaluation.

use std::fmt;
use std::sync::Arc;

use ndarray::ArrayD;

use super::grid::ChunkGrid;

/// Loader for a deferred block. Called with the block index, only during evaluation.
pub type BlockLoader<T> = dyn Fn(&[usize]) -> Result<ArrayD<T>, String> + Send + Sync;

/// Where a source node gets its blocks from
pub(crate) enum Source<T> {
    /// Blocks already in memory, in row-major block order
    Ready(Vec<ArrayD<T>>),
    /// Blocks produced on demand
    Deferred(Arc<BlockLoader<T>>),
}

/// One node of the computation graph
pub(crate) enum Node<T> {
    Source(Source<T>),
    /// Rotate the last two axes of `input` by `k` quarter turns, `k` in `0..4`
    Rot90 { input: Arc<Node<T>>, input_grid: ChunkGrid, k: u8 },
}

impl<T> Node<T> {
    /// Number of nodes reachable from this one, itself included.
    pub(crate) fn node_count(&self) -> usize {
        match self {
            Node::Source(_) => 1,
            Node::Rot90 { input, .. } => 1 + input.node_count(),
        }
    }

    pub(crate) fn label(&self) -> String {
        match self {
            Node::Source(Source::Ready(blocks)) => format!("source({} ready)", blocks.len()),
            Node::Source(Source::Deferred(_)) => "source(deferred)".to_string(),
            Node::Rot90 { k, .. } => format!("rot90(k={})", k),
        }
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Source(_) => f.write_str(&self.label()),
            Node::Rot90 { input, .. } => write!(f, "{} <- {:?}", self.label(), input),
        }
    }
}
