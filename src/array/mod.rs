//! Lazy chunked-array engine
//!
//! # Module Structure
//!
//! - [`grid`] - Shape and per-axis chunk lengths
//! - [`graph`] - Computation-graph nodes
//! - [`lazy`] - The `LazyArray` handle and the `QuarterTurns` primitive
//! - [`compute`] - Block-parallel evaluation

pub mod compute;
pub mod graph;
pub mod grid;
pub mod lazy;

pub use graph::BlockLoader;
pub use grid::ChunkGrid;
pub use lazy::{LazyArray, QuarterTurns};
