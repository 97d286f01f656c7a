//! Quarter-turn rotation of image stacks
//!
//! Images are stored with the rotation plane on the last two axes
//! (`(N, Y, X)` for a plain stack). Every leading axis is a batch axis and
//! is left as it is. Rotating only adds a node to the array's computation
//! graph; no pixel is read until the result is evaluated.
//!
//! # Examples
//!
//! ```
//! use ndarray::arr3;
//! use stackrot::{rotate_quarter_turns, LazyArray, RotationDirection};
//!
//! let images = LazyArray::from_array(arr3(&[[[1, 2], [3, 4]]]).into_dyn(), &[1, 2, 2]).unwrap();
//! let rotated = rotate_quarter_turns(&images, RotationDirection::Clockwise).unwrap();
//! assert_eq!(rotated.compute().unwrap(), arr3(&[[[3, 1], [4, 2]]]).into_dyn());
//! ```

use crate::array::QuarterTurns;
use crate::config::StackrotConfig;
use crate::direction::RotationDirection;
use crate::Result;

/// Rotate every image plane of `images` by 90 degrees in `direction`.
///
/// Engine errors (for example an array with fewer than two axes) are
/// returned unchanged inside [`RotateError::Engine`](crate::RotateError::Engine).
pub fn rotate_quarter_turns<A: QuarterTurns>(images: &A, direction: RotationDirection) -> Result<A> {
    let k = direction.quarter_turns();
    log::debug!("rotating image planes {} (k={})", direction, k);
    Ok(images.rot90(k)?)
}

/// Rotate using the symbolic direction `"cw"` or `"ccw"`; `None` rotates clockwise.
///
/// Any other value fails with [`RotateError::InvalidDirection`](crate::RotateError::InvalidDirection)
/// before the array is touched.
pub fn rotate_with_sense<A: QuarterTurns>(images: &A, sense: Option<&str>) -> Result<A> {
    let direction = match sense {
        Some(s) => s.parse()?,
        None => RotationDirection::default(),
    };
    rotate_quarter_turns(images, direction)
}

/// Rotator with a configured default direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rotator {
    direction: RotationDirection,
}

impl Rotator {
    /// Rotator whose default direction is `direction`.
    pub fn new(direction: RotationDirection) -> Self {
        Self { direction }
    }

    /// Rotator using the `[rotate]` section of a configuration.
    pub fn from_config(config: &StackrotConfig) -> Self {
        Self::new(config.rotate.direction)
    }

    /// The configured default direction.
    pub fn direction(&self) -> RotationDirection {
        self.direction
    }

    /// Rotate in the configured direction.
    pub fn rotate<A: QuarterTurns>(&self, images: &A) -> Result<A> {
        rotate_quarter_turns(images, self.direction)
    }

    /// Rotate in an explicit direction, ignoring the configured one.
    pub fn rotate_with<A: QuarterTurns>(&self, images: &A, direction: RotationDirection) -> Result<A> {
        rotate_quarter_turns(images, direction)
    }
}
