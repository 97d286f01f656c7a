//! Stackrot - lazy quarter-turn rotation for chunked image stacks
//!
//! This library provides functionality to:
//! - Describe large image stacks as lazily evaluated, chunked arrays
//! - Rotate every image of a stack by 90 degrees clockwise or counter-clockwise
//!   without evaluating anything
//! - Evaluate the result block by block, in parallel

pub mod array;
pub mod config;
pub mod direction;
pub mod error;
pub mod rotator;

pub use array::{ChunkGrid, LazyArray, QuarterTurns};
pub use config::{ComputeConfig, StackrotConfig};
pub use direction::RotationDirection;
pub use error::{ArrayError, RotateError};
pub use rotator::{rotate_quarter_turns, rotate_with_sense, Rotator};

/// Result type alias for rotation requests.
pub type Result<T> = std::result::Result<T, RotateError>;
