//! Rotation direction and its quarter-turn count
//!
//! Quarter turns are counted in the mathematically positive sense, so a
//! counter-clockwise turn is `+1` and a clockwise turn is `-1`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RotateError;

/// Direction of a 90-degree rotation of the image plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RotationDirection {
    /// Rotate clockwise (`"cw"`)
    #[default]
    #[serde(rename = "cw")]
    Clockwise,
    /// Rotate counter-clockwise (`"ccw"`)
    #[serde(rename = "ccw")]
    CounterClockwise,
}

impl RotationDirection {
    /// Signed number of counter-clockwise quarter turns for this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackrot::RotationDirection;
    ///
    /// assert_eq!(RotationDirection::CounterClockwise.quarter_turns(), 1);
    /// assert_eq!(RotationDirection::Clockwise.quarter_turns(), -1);
    /// ```
    pub fn quarter_turns(self) -> i32 {
        match self {
            RotationDirection::CounterClockwise => 1,
            RotationDirection::Clockwise => -1,
        }
    }

    /// The direction that undoes this one.
    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }

    /// Symbolic spelling (`"cw"` or `"ccw"`).
    pub fn as_str(self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "cw",
            RotationDirection::CounterClockwise => "ccw",
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationDirection {
    type Err = RotateError;

    /// Parses exactly `"cw"` or `"ccw"`. Case variants and synonyms are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cw" => Ok(RotationDirection::Clockwise),
            "ccw" => Ok(RotationDirection::CounterClockwise),
            other => Err(RotateError::InvalidDirection(other.to_string())),
        }
    }
}

impl TryFrom<&str> for RotationDirection {
    type Error = RotateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
