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
//! Shapes made of several convex pieces
//!
//! A [`CompositePolygon`] is what unions, multi-piece intersections and
//! slices of concave shapes produce. It may consist of several disjoint
//! regions, so all integrals are accumulated over the pieces rather than over
//! an outline.

use crate::error::GeometryResult;
use crate::math::{BoundingBox, CFrame, Vec2};

use super::convex::ConvexPolygon;
use super::decompose::convex_decomposition;

/// A shape stored as its convex pieces plus one or more outlines for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct CompositePolygon {
    outlines: Vec<Vec<Vec2>>,
    pieces: Vec<ConvexPolygon>,
}

impl CompositePolygon {
    /// Decompose a single counter-clockwise outline
    ///
    /// # Examples
    ///
    /// ```
    /// use physics2d::geom::CompositePolygon;
    /// use physics2d::math::Vec2;
    ///
    /// let arrow = CompositePolygon::new(vec![
    ///     Vec2::new(0.0, 0.0),
    ///     Vec2::new(2.0, -1.0),
    ///     Vec2::new(1.0, 0.0),
    ///     Vec2::new(2.0, 1.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(arrow.pieces().len(), 2);
    /// assert!((arrow.area() - 1.0).abs() < 1e-12);
    /// ```
    pub fn new(outline: Vec<Vec2>) -> GeometryResult<Self> {
        let pieces = convex_decomposition(&outline)?
            .into_iter()
            .map(ConvexPolygon::new)
            .collect();
        Ok(CompositePolygon {
            outlines: vec![outline],
            pieces,
        })
    }

    /// Assemble from already convex pieces
    pub(crate) fn from_regions(outlines: Vec<Vec<Vec2>>, pieces: Vec<ConvexPolygon>) -> Self {
        CompositePolygon { outlines, pieces }
    }

    /// Assemble from convex pieces, using each piece as its own outline
    pub(crate) fn from_pieces(pieces: Vec<ConvexPolygon>) -> Self {
        let outlines = pieces.iter().map(|p| p.corners().to_vec()).collect();
        CompositePolygon { outlines, pieces }
    }

    /// Outlines of every region
    pub fn outlines(&self) -> &[Vec<Vec2>] {
        &self.outlines
    }

    /// Convex pieces
    pub fn pieces(&self) -> &[ConvexPolygon] {
        &self.pieces
    }

    /// Sum of the piece areas
    pub fn area(&self) -> f64 {
        self.pieces.iter().map(|p| p.area()).sum()
    }

    /// Area-weighted centroid of the pieces
    pub fn center_of_mass(&self) -> Vec2 {
        let area = self.area();
        if area == 0.0 {
            return Vec2::ZERO;
        }
        let weighted = self
            .pieces
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.center_of_mass() * p.area());
        weighted / area
    }

    /// Second moment about the combined centroid, by the parallel axis theorem
    pub fn inertial_area(&self) -> f64 {
        let com = self.center_of_mass();
        self.pieces
            .iter()
            .map(|p| p.inertial_area() + p.area() * (p.center_of_mass() - com).length_squared())
            .sum()
    }

    /// Whether any piece contains the point
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.pieces.iter().any(|p| p.contains_point(point))
    }

    /// Box around every piece, `None` if there are no pieces
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::merge_all(self.pieces.iter().map(|p| p.bounding_box()))
    }

    /// Map outlines and pieces through a frame
    pub fn transform_to_cframe(&self, frame: &CFrame) -> CompositePolygon {
        CompositePolygon {
            outlines: self
                .outlines
                .iter()
                .map(|o| super::polygon::transformed(o, frame))
                .collect(),
            pieces: self
                .pieces
                .iter()
                .map(|p| p.transform_to_cframe(frame))
                .collect(),
        }
    }

    /// Scale about the origin
    pub fn scale(&self, factor: f64) -> CompositePolygon {
        CompositePolygon {
            outlines: self
                .outlines
                .iter()
                .map(|o| super::polygon::scaled(o, factor))
                .collect(),
            pieces: self.pieces.iter().map(|p| p.scale(factor)).collect(),
        }
    }
}
