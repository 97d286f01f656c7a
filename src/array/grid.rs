//! Chunk grid: array shape plus the chunk lengths along every axis

use crate::error::ArrayError;

/// Per-axis chunk lengths of a chunked array.
///
/// The array shape is the per-axis sum of chunk lengths. An axis of length
/// zero has no chunks; every other chunk length is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkGrid {
    chunks: Vec<Vec<usize>>,
}

impl ChunkGrid {
    /// Build a grid from explicit per-axis chunk lengths.
    pub fn new(chunks: Vec<Vec<usize>>) -> Result<Self, ArrayError> {
        for (axis, lens) in chunks.iter().enumerate() {
            if lens.iter().any(|&len| len == 0) {
                return Err(ArrayError::ZeroChunk { axis });
            }
        }
        Ok(Self { chunks })
    }

    /// Split `shape` into chunks of `chunk_shape`, with a shorter trailing chunk
    /// where an axis length is not a multiple of its chunk length.
    pub fn regular(shape: &[usize], chunk_shape: &[usize]) -> Result<Self, ArrayError> {
        if shape.len() != chunk_shape.len() {
            return Err(ArrayError::ChunkRank {
                array_ndim: shape.len(),
                chunk_ndim: chunk_shape.len(),
            });
        }

        let mut chunks = Vec::with_capacity(shape.len());
        for (axis, (&len, &step)) in shape.iter().zip(chunk_shape).enumerate() {
            if step == 0 {
                return Err(ArrayError::ZeroChunk { axis });
            }
            let mut lens = vec![step; len / step];
            if len % step != 0 {
                lens.push(len % step);
            }
            chunks.push(lens);
        }
        Ok(Self { chunks })
    }

    pub fn ndim(&self) -> usize {
        self.chunks.len()
    }

    /// Array shape.
    pub fn shape(&self) -> Vec<usize> {
        self.chunks.iter().map(|lens| lens.iter().sum()).collect()
    }

    /// Chunk lengths along every axis.
    pub fn chunks(&self) -> &[Vec<usize>] {
        &self.chunks
    }

    /// Number of blocks along every axis.
    pub fn blocks_per_axis(&self) -> Vec<usize> {
        self.chunks.iter().map(Vec::len).collect()
    }

    /// Total number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.chunks.iter().map(Vec::len).product()
    }

    pub(crate) fn check_index(&self, index: &[usize]) -> Result<(), ArrayError> {
        let grid = self.blocks_per_axis();
        if index.len() != grid.len() || index.iter().zip(&grid).any(|(&i, &n)| i >= n) {
            return Err(ArrayError::BlockIndex { index: index.to_vec(), grid });
        }
        Ok(())
    }

    /// Shape of the block at `index`.
    pub fn block_shape(&self, index: &[usize]) -> Result<Vec<usize>, ArrayError> {
        self.check_index(index)?;
        Ok(index.iter().zip(&self.chunks).map(|(&i, lens)| lens[i]).collect())
    }

    /// Element offset of the block at `index` along every axis.
    pub fn block_offset(&self, index: &[usize]) -> Result<Vec<usize>, ArrayError> {
        self.check_index(index)?;
        Ok(index.iter().zip(&self.chunks).map(|(&i, lens)| lens[..i].iter().sum()).collect())
    }

    /// Every block index in row-major order.
    pub fn block_indices(&self) -> Vec<Vec<usize>> {
        let grid = self.blocks_per_axis();
        let total = self.num_blocks();
        let mut out = Vec::with_capacity(total);
        for flat in 0..total {
            let mut rem = flat;
            let mut index = vec![0; grid.len()];
            for axis in (0..grid.len()).rev() {
                index[axis] = rem % grid[axis];
                rem /= grid[axis];
            }
            out.push(index);
        }
        out
    }

    /// Grid after rotating the last two axes by `k` quarter turns (`k` in `0..4`).
    pub(crate) fn rot90(&self, k: u8) -> Self {
        let mut chunks = self.chunks.clone();
        let (a, b) = plane_axes(chunks.len());
        let rows = self.chunks[a].clone();
        let cols = self.chunks[b].clone();
        match k {
            1 => {
                chunks[a] = reversed(cols);
                chunks[b] = rows;
            }
            2 => {
                chunks[a] = reversed(rows);
                chunks[b] = reversed(cols);
            }
            3 => {
                chunks[a] = cols;
                chunks[b] = reversed(rows);
            }
            _ => {}
        }
        Self { chunks }
    }
}

/// Axes of the rotation plane: the last two.
pub(crate) fn plane_axes(ndim: usize) -> (usize, usize) {
    (ndim - 2, ndim - 1)
}

fn reversed(mut lens: Vec<usize>) -> Vec<usize> {
    lens.reverse();
    lens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_with_remainder() {
        let grid = ChunkGrid::regular(&[3, 5, 4], &[1, 2, 4]).unwrap();
        assert_eq!(grid.chunks(), &[vec![1, 1, 1], vec![2, 2, 1], vec![4]]);
        assert_eq!(grid.shape(), vec![3, 5, 4]);
        assert_eq!(grid.num_blocks(), 9);
    }

    #[test]
    fn test_regular_rank_mismatch() {
        let err = ChunkGrid::regular(&[3, 5, 4], &[1, 2]).unwrap_err();
        assert_eq!(err, ArrayError::ChunkRank { array_ndim: 3, chunk_ndim: 2 });
    }

    #[test]
    fn test_regular_zero_chunk() {
        let err = ChunkGrid::regular(&[3, 5], &[1, 0]).unwrap_err();
        assert_eq!(err, ArrayError::ZeroChunk { axis: 1 });
    }

    #[test]
    fn test_new_rejects_zero_length() {
        assert_eq!(ChunkGrid::new(vec![vec![2, 0]]).unwrap_err(), ArrayError::ZeroChunk { axis: 0 });
    }

    #[test]
    fn test_empty_axis_has_no_blocks() {
        let grid = ChunkGrid::regular(&[0, 4, 4], &[1, 2, 2]).unwrap();
        assert_eq!(grid.num_blocks(), 0);
        assert!(grid.block_indices().is_empty());
        assert_eq!(grid.shape(), vec![0, 4, 4]);
    }

    #[test]
    fn test_block_geometry() {
        let grid = ChunkGrid::regular(&[5, 7], &[2, 3]).unwrap();
        assert_eq!(grid.block_shape(&[2, 2]).unwrap(), vec![1, 1]);
        assert_eq!(grid.block_offset(&[2, 2]).unwrap(), vec![4, 6]);
        assert_eq!(grid.block_offset(&[1, 0]).unwrap(), vec![2, 0]);
        assert!(matches!(grid.block_shape(&[3, 0]), Err(ArrayError::BlockIndex { .. })));
        assert!(matches!(grid.block_offset(&[0]), Err(ArrayError::BlockIndex { .. })));
    }

    #[test]
    fn test_block_indices_row_major() {
        let grid = ChunkGrid::regular(&[2, 3], &[1, 2]).unwrap();
        assert_eq!(
            grid.block_indices(),
            vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
        );
    }

    #[test]
    fn test_rot90_permutes_chunks() {
        let grid = ChunkGrid::new(vec![vec![3], vec![1, 2], vec![4, 4, 1]]).unwrap();
        assert_eq!(grid.rot90(0), grid);
        assert_eq!(grid.rot90(1).chunks(), &[vec![3], vec![1, 4, 4], vec![1, 2]]);
        assert_eq!(grid.rot90(2).chunks(), &[vec![3], vec![2, 1], vec![1, 4, 4]]);
        assert_eq!(grid.rot90(3).chunks(), &[vec![3], vec![4, 4, 1], vec![2, 1]]);
    }

    #[test]
    fn test_rot90_four_times_is_identity() {
        let grid = ChunkGrid::new(vec![vec![2, 1], vec![3, 1, 1], vec![2, 5]]).unwrap();
        let mut turned = grid.clone();
        for _ in 0..4 {
            turned = turned.rot90(1);
        }
        assert_eq!(turned, grid);
    }
}
