//! Lazy chunked array handle
//!
//! A `LazyArray` pairs a chunk grid with the graph node that produces its
//! blocks. Handles are cheap to clone and share their graph lineage through
//! `Arc`; operations build new handles and never evaluate anything.

use std::fmt;
use std::sync::Arc;

use ndarray::{ArrayD, Axis, Slice};

use super::graph::{BlockLoader, Node, Source};
use super::grid::{plane_axes, ChunkGrid};
use crate::error::ArrayError;

/// Rotation of the last two axes by a number of quarter turns.
///
/// `k` counts counter-clockwise quarter turns; negative values turn
/// clockwise and any value is taken modulo 4. Implementations must not
/// evaluate anything eagerly when the array is lazy.
pub trait QuarterTurns: Sized {
    fn rot90(&self, k: i32) -> Result<Self, ArrayError>;
}

/// Handle to a lazily evaluated, chunked n-dimensional array
pub struct LazyArray<T> {
    pub(crate) grid: ChunkGrid,
    pub(crate) node: Arc<Node<T>>,
}

impl<T> Clone for LazyArray<T> {
    fn clone(&self) -> Self {
        Self { grid: self.grid.clone(), node: Arc::clone(&self.node) }
    }
}

impl<T> fmt::Debug for LazyArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyArray")
            .field("shape", &self.shape())
            .field("chunks", &self.grid.chunks())
            .field("graph", &self.node)
            .finish()
    }
}

impl<T: Clone> LazyArray<T> {
    /// Split an in-memory array into blocks of `chunk_shape`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndarray::arr3;
    /// use stackrot::LazyArray;
    ///
    /// let images = LazyArray::from_array(arr3(&[[[1, 2], [3, 4]]]).into_dyn(), &[1, 1, 2]).unwrap();
    /// assert_eq!(images.shape(), vec![1, 2, 2]);
    /// assert_eq!(images.num_blocks(), 2);
    /// ```
    pub fn from_array(array: ArrayD<T>, chunk_shape: &[usize]) -> Result<Self, ArrayError> {
        let grid = ChunkGrid::regular(array.shape(), chunk_shape)?;

        let mut blocks = Vec::with_capacity(grid.num_blocks());
        for index in grid.block_indices() {
            let offset = grid.block_offset(&index)?;
            let shape = grid.block_shape(&index)?;
            let block = array.slice_each_axis(|ax| {
                let axis = ax.axis.index();
                Slice::from(offset[axis]..offset[axis] + shape[axis])
            });
            blocks.push(block.to_owned());
        }

        Ok(Self { grid, node: Arc::new(Node::Source(Source::Ready(blocks))) })
    }
}

impl<T> LazyArray<T> {
    /// Array whose blocks are produced by `loader` at evaluation time.
    ///
    /// The loader receives the block index and must return a block of the
    /// shape the grid assigns to that index. It is never called while graphs
    /// are being built.
    pub fn from_blocks<F>(grid: ChunkGrid, loader: F) -> Self
    where
        F: Fn(&[usize]) -> Result<ArrayD<T>, String> + Send + Sync + 'static,
    {
        let loader: Arc<BlockLoader<T>> = Arc::new(loader);
        Self { grid, node: Arc::new(Node::Source(Source::Deferred(loader))) }
    }

    pub fn shape(&self) -> Vec<usize> {
        self.grid.shape()
    }

    pub fn ndim(&self) -> usize {
        self.grid.ndim()
    }

    /// Chunk lengths along every axis.
    pub fn chunks(&self) -> &[Vec<usize>] {
        self.grid.chunks()
    }

    pub fn grid(&self) -> &ChunkGrid {
        &self.grid
    }

    pub fn num_blocks(&self) -> usize {
        self.grid.num_blocks()
    }

    /// Number of graph nodes this handle depends on, its own included.
    ///
    /// A rotation of a rotated array replaces the earlier rotation node, so
    /// this is 1 for a source and 2 for any rotated handle.
    pub fn graph_len(&self) -> usize {
        self.node.node_count()
    }

    /// True when both handles share the same graph node.
    pub fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl<T> QuarterTurns for LazyArray<T> {
    fn rot90(&self, k: i32) -> Result<Self, ArrayError> {
        let ndim = self.ndim();
        if ndim < 2 {
            return Err(ArrayError::TooFewAxes { ndim });
        }

        let k = k.rem_euclid(4) as u8;
        let grid = self.grid.rot90(k);
        log::debug!("rot90 node k={} shape {:?} -> {:?}", k, self.shape(), grid.shape());

        // Quarter turns add up: a rotation of a rotation is one node over
        // the original input, so graph depth never exceeds 2.
        let node = match self.node.as_ref() {
            Node::Rot90 { input, input_grid, k: k0 } => Node::Rot90 {
                input: Arc::clone(input),
                input_grid: input_grid.clone(),
                k: (k0 + k) % 4,
            },
            Node::Source(_) => {
                Node::Rot90 { input: Arc::clone(&self.node), input_grid: self.grid.clone(), k }
            }
        };
        Ok(Self { grid, node: Arc::new(node) })
    }
}

/// Eager rotation of an in-memory array, used as a reference result.
impl<T: Clone> QuarterTurns for ArrayD<T> {
    fn rot90(&self, k: i32) -> Result<Self, ArrayError> {
        let ndim = self.ndim();
        if ndim < 2 {
            return Err(ArrayError::TooFewAxes { ndim });
        }
        Ok(rotate_block(self, k.rem_euclid(4) as u8))
    }
}

/// Rotate the last two axes of one in-memory block by `k` quarter turns.
pub(crate) fn rotate_block<T: Clone>(block: &ArrayD<T>, k: u8) -> ArrayD<T> {
    let (a, b) = plane_axes(block.ndim());
    let mut view = block.view();
    match k {
        1 => {
            view.invert_axis(Axis(b));
            view.swap_axes(a, b);
        }
        2 => {
            view.invert_axis(Axis(a));
            view.invert_axis(Axis(b));
        }
        3 => {
            view.swap_axes(a, b);
            view.invert_axis(Axis(b));
        }
        _ => {}
    }
    view.as_standard_layout().into_owned()
}
