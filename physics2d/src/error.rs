// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Error types
//!
//! Degenerate geometry (an empty clip, two disjoint pieces) is not an error;
//! it is represented by [`Shape::Null`](crate::geom::Shape::Null). The errors
//! here cover input that would corrupt downstream computation if accepted.

use std::error::Error;
use std::fmt;

use crate::physics::BodyId;

/// Invalid polygon input
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A concave corner admits no bridge, so the outline must self-intersect
    InvalidPolygon {
        /// Index of the offending corner in the polygon being split
        vertex: usize,
    },
    /// Fewer than three corners
    TooFewVertices {
        /// Number of corners supplied
        count: usize,
    },
    /// A corner has a NaN or infinite coordinate
    NonFiniteVertex {
        /// Index of the offending corner
        vertex: usize,
    },
    /// The signed area is not positive
    ClockwiseWinding {
        /// Signed area computed from the corners
        signed_area: f64,
    },
    /// Two non-adjacent edges cross
    SelfIntersecting {
        /// Index of the first edge's starting corner
        first_edge: usize,
        /// Index of the second edge's starting corner
        second_edge: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidPolygon { vertex } => write!(
                f,
                "invalid polygon: concave corner {} has no valid bridge",
                vertex
            ),
            GeometryError::TooFewVertices { count } => {
                write!(f, "polygon needs at least 3 corners, got {}", count)
            }
            GeometryError::NonFiniteVertex { vertex } => {
                write!(f, "corner {} has a non-finite coordinate", vertex)
            }
            GeometryError::ClockwiseWinding { signed_area } => write!(
                f,
                "polygon must be wound counter-clockwise (signed area {})",
                signed_area
            ),
            GeometryError::SelfIntersecting {
                first_edge,
                second_edge,
            } => write!(
                f,
                "polygon edges {} and {} intersect",
                first_edge, second_edge
            ),
        }
    }
}

impl Error for GeometryError {}

/// Errors raised by world and configuration operations
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// No body with this id is registered
    UnknownBody(BodyId),
    /// A part index is out of range for its body
    UnknownPart {
        /// Owning body
        body: BodyId,
        /// Requested part index
        index: usize,
    },
    /// A configuration value is out of range
    InvalidConfig(String),
    /// A timestep is non-positive or non-finite
    InvalidTimestep(f64),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::UnknownBody(id) => write!(f, "unknown body {}", id),
            WorldError::UnknownPart { body, index } => {
                write!(f, "body {} has no part {}", body, index)
            }
            WorldError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            WorldError::InvalidTimestep(dt) => {
                write!(f, "invalid timestep {}: must be positive and finite", dt)
            }
        }
    }
}

impl Error for WorldError {}

/// Result alias for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result alias for world operations
pub type WorldResult<T> = Result<T, WorldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = GeometryError::InvalidPolygon { vertex: 3 };
        assert!(e.to_string().contains("corner 3"));
        let e = WorldError::InvalidTimestep(-1.0);
        assert!(e.to_string().contains("positive and finite"));
        let e = WorldError::UnknownBody(BodyId::new(7));
        assert!(e.to_string().contains("Body(7)"));
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn takes_error(_: &dyn Error) {}
        takes_error(&GeometryError::TooFewVertices { count: 2 });
        takes_error(&WorldError::InvalidConfig("x".into()));
    }
}
