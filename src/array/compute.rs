//! Evaluation of lazy arrays
//!
//! Every output block is produced independently by walking the graph back to
//! its source block, so blocks can be evaluated in parallel and a single
//! block can be evaluated without touching the rest of the array.

use ndarray::{ArrayD, IxDyn, Slice};
use rayon::prelude::*;

use super::graph::{Node, Source};
use super::grid::{plane_axes, ChunkGrid};
use super::lazy::{rotate_block, LazyArray};
use crate::config::ComputeConfig;
use crate::error::ArrayError;

impl<T: Clone + Send + Sync> LazyArray<T> {
    /// Evaluate the whole array with the default [`ComputeConfig`].
    pub fn compute(&self) -> Result<ArrayD<T>, ArrayError> {
        self.compute_with(&ComputeConfig::default())
    }

    /// Evaluate the whole array.
    pub fn compute_with(&self, config: &ComputeConfig) -> Result<ArrayD<T>, ArrayError> {
        log::debug!(
            "computing shape {:?}: {} block(s), {} graph node(s), parallel={}",
            self.shape(),
            self.num_blocks(),
            self.graph_len(),
            config.parallel
        );

        let blocks = match (config.parallel, config.threads) {
            (false, _) => self.eval_blocks_sequential()?,
            (true, None) => self.eval_blocks_parallel()?,
            (true, Some(threads)) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ArrayError::ThreadPool(e.to_string()))?;
                pool.install(|| self.eval_blocks_parallel())?
            }
        };

        assemble(&self.grid, blocks)
    }

    /// Evaluate the single block at `index`.
    pub fn compute_block(&self, index: &[usize]) -> Result<ArrayD<T>, ArrayError> {
        self.grid.check_index(index)?;
        eval_block(&self.node, &self.grid, index)
    }

    fn eval_blocks_sequential(&self) -> Result<Vec<(Vec<usize>, ArrayD<T>)>, ArrayError> {
        self.grid
            .block_indices()
            .into_iter()
            .map(|index| {
                let block = eval_block(&self.node, &self.grid, &index)?;
                Ok((index, block))
            })
            .collect()
    }

    fn eval_blocks_parallel(&self) -> Result<Vec<(Vec<usize>, ArrayD<T>)>, ArrayError> {
        self.grid
            .block_indices()
            .into_par_iter()
            .map(|index| {
                let block = eval_block(&self.node, &self.grid, &index)?;
                Ok((index, block))
            })
            .collect()
    }
}

fn eval_block<T: Clone>(
    node: &Node<T>,
    grid: &ChunkGrid,
    index: &[usize],
) -> Result<ArrayD<T>, ArrayError> {
    log::trace!("block {:?} of {}", index, node.label());
    match node {
        Node::Source(Source::Ready(blocks)) => {
            let flat = flat_index(index, &grid.blocks_per_axis());
            blocks.get(flat).cloned().ok_or_else(|| ArrayError::BlockIndex {
                index: index.to_vec(),
                grid: grid.blocks_per_axis(),
            })
        }
        Node::Source(Source::Deferred(loader)) => {
            let block = loader(index)
                .map_err(|message| ArrayError::BlockLoad { index: index.to_vec(), message })?;
            let expected = grid.block_shape(index)?;
            if block.shape() != expected.as_slice() {
                return Err(ArrayError::BlockShape {
                    index: index.to_vec(),
                    expected,
                    actual: block.shape().to_vec(),
                });
            }
            Ok(block)
        }
        Node::Rot90 { input, input_grid, k } => {
            let source = source_index(index, &input_grid.blocks_per_axis(), *k);
            let block = eval_block(input, input_grid, &source)?;
            Ok(rotate_block(&block, *k))
        }
    }
}

/// Index of the input block that lands at output block `index` after
/// rotating by `k` quarter turns.
fn source_index(index: &[usize], input_blocks: &[usize], k: u8) -> Vec<usize> {
    let (a, b) = plane_axes(index.len());
    let (p, q) = (index[a], index[b]);
    let (rows, cols) = (input_blocks[a], input_blocks[b]);
    let mut source = index.to_vec();
    let (src_a, src_b) = match k {
        1 => (q, cols - 1 - p),
        2 => (rows - 1 - p, cols - 1 - q),
        3 => (rows - 1 - q, p),
        _ => (p, q),
    };
    source[a] = src_a;
    source[b] = src_b;
    source
}

fn flat_index(index: &[usize], blocks_per_axis: &[usize]) -> usize {
    index.iter().zip(blocks_per_axis).fold(0, |acc, (&i, &n)| acc * n + i)
}

fn assemble<T: Clone>(
    grid: &ChunkGrid,
    blocks: Vec<(Vec<usize>, ArrayD<T>)>,
) -> Result<ArrayD<T>, ArrayError> {
    let shape = grid.shape();
    let fill = match blocks.iter().find_map(|(_, block)| block.iter().next()) {
        Some(value) => value.clone(),
        None => {
            // Only arrays with an empty axis have no elements at all
            return ArrayD::from_shape_vec(IxDyn(&shape), Vec::new()).map_err(|_| {
                ArrayError::BlockShape { index: Vec::new(), expected: shape.clone(), actual: vec![0] }
            });
        }
    };

    let mut out = ArrayD::from_elem(IxDyn(&shape), fill);
    for (index, block) in blocks {
        let offset = grid.block_offset(&index)?;
        let mut target = out.slice_each_axis_mut(|ax| {
            let axis = ax.axis.index();
            Slice::from(offset[axis]..offset[axis] + block.shape()[axis])
        });
        target.assign(&block);
    }
    Ok(out)
}
