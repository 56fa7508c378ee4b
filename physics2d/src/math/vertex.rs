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
//! Polygon vertices with derived orientation data
//!
//! A [`Vertex2`] is a corner position augmented with information derived from
//! its neighbours in a counter-clockwise polygon:
//!
//! - `orientation`: unit bisector of the corner, pointing out of the polygon
//! - `normal`: outward unit normal of the edge leaving this vertex
//! - `edge_length`: length of that edge
//! - `concave`: whether the corner turns clockwise
//!
//! Vertices are only ever derived from corner lists, never assembled by hand.

use super::mat2::RotMat2;
use super::vec2::{NormalizedVec2, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon corner with derived orientation data
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex2 {
    position: Vec2,
    orientation: NormalizedVec2,
    normal: NormalizedVec2,
    edge_length: f64,
    concave: bool,
}

impl Vertex2 {
    /// Derive the vertex at `pos` from its predecessor and successor
    ///
    /// The neighbours must belong to a counter-clockwise polygon. A straight
    /// corner has no bisector, so its orientation falls back to the edge normal.
    pub fn from_bisector(prev: Vec2, pos: Vec2, next: Vec2) -> Self {
        let forward = next - pos;
        let backward = prev - pos;
        let turn = forward.cross(backward);

        let normal = forward.rotate90_clockwise().normalize();

        // the raw bisector points into the smaller of the two angles, which is
        // the interior for a convex corner and the exterior for a concave one
        let bisector = Vec2::bisect(forward, backward);
        let orientation = match bisector.try_normalize() {
            Some(b) if turn > 0.0 => -b,
            Some(b) => b,
            None => normal,
        };

        Vertex2 {
            position: pos,
            orientation,
            normal,
            edge_length: forward.length(),
            concave: turn < 0.0,
        }
    }

    /// Derive vertices for every corner of a counter-clockwise polygon
    pub fn from_corners(corners: &[Vec2]) -> Vec<Vertex2> {
        let n = corners.len();
        (0..n)
            .map(|i| {
                let prev = corners[(i + n - 1) % n];
                let next = corners[(i + 1) % n];
                Vertex2::from_bisector(prev, corners[i], next)
            })
            .collect()
    }

    /// Corner position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Outward bisector of the corner
    pub fn orientation(&self) -> NormalizedVec2 {
        self.orientation
    }

    /// Outward normal of the edge to the following vertex
    pub fn normal(&self) -> NormalizedVec2 {
        self.normal
    }

    /// Length of the edge to the following vertex
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// Whether the corner turns clockwise under counter-clockwise winding
    pub fn is_concave(&self) -> bool {
        self.concave
    }

    /// Rotate then translate the vertex; directions rotate with it
    pub(crate) fn transformed(&self, offset: Vec2, rotation: RotMat2) -> Vertex2 {
        Vertex2 {
            position: rotation * self.position + offset,
            orientation: rotation.rotate_normalized(self.orientation),
            normal: rotation.rotate_normalized(self.normal),
            edge_length: self.edge_length,
            concave: self.concave,
        }
    }
}
