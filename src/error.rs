//! Error types for rotation requests and the chunked-array engine
//!
//! `RotateError` is what callers of the rotator see. Engine failures are
//! carried inside it untouched so that their message and source chain are
//! exactly what the engine produced.

/// Errors raised by the lazy chunked-array engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ArrayError {
    /// Plane rotation needs two trailing axes
    #[error("cannot rotate an array with {ndim} axis/axes: at least 2 are required")]
    TooFewAxes { ndim: usize },

    /// Chunk shape and array shape have different ranks
    #[error("chunk shape has {chunk_ndim} axes but the array has {array_ndim}")]
    ChunkRank { array_ndim: usize, chunk_ndim: usize },

    /// A chunk length of zero along a non-empty axis
    #[error("chunk length along axis {axis} must be greater than zero")]
    ZeroChunk { axis: usize },

    /// Block index outside the chunk grid
    #[error("block index {index:?} is outside the chunk grid {grid:?}")]
    BlockIndex { index: Vec<usize>, grid: Vec<usize> },

    /// A deferred block failed to load at evaluation time
    #[error("failed to load block {index:?}: {message}")]
    BlockLoad { index: Vec<usize>, message: String },

    /// A loaded block does not have the shape its chunk grid promises
    #[error("block {index:?} has shape {actual:?}, expected {expected:?}")]
    BlockShape { index: Vec<usize>, expected: Vec<usize>, actual: Vec<usize> },

    /// The dedicated evaluation thread pool could not be created
    #[error("failed to build evaluation thread pool: {0}")]
    ThreadPool(String),
}

/// Errors returned by rotation requests
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RotateError {
    /// Rotation direction was not one of the accepted symbols
    #[error("invalid rotation direction {0:?}: must be 'cw' or 'ccw'")]
    InvalidDirection(String),

    /// Error raised by the array engine, passed through as-is
    #[error(transparent)]
    Engine(#[from] ArrayError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_direction_names_value() {
        let err = RotateError::InvalidDirection("CW".to_string());
        assert_eq!(err.to_string(), "invalid rotation direction \"CW\": must be 'cw' or 'ccw'");
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let inner = ArrayError::TooFewAxes { ndim: 1 };
        let err = RotateError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert!(err.source().is_none());
        assert_eq!(err, RotateError::Engine(inner));
    }

    #[test]
    fn test_block_shape_message() {
        let err = ArrayError::BlockShape { index: vec![0, 1], expected: vec![2, 2], actual: vec![3] };
        assert_eq!(err.to_string(), "block [0, 1] has shape [3], expected [2, 2]");
    }
}
