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
//! Convex polygons
//!
//! Every shape is reduced to a set of [`ConvexPolygon`] pieces before
//! collision detection, so this type carries the SAT, nearest-exit and
//! clipping entry points.

use crate::math::{BoundingBox, CFrame, NormalizedVec2, Range, Vec2, Vertex2};

use super::clip;
use super::collision;
use super::polygon;
use super::primitives::Triangle;

/// A convex polygon with counter-clockwise corners
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    corners: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Wrap a list of counter-clockwise convex corners
    ///
    /// Convexity is not re-checked; run
    /// [`validate_polygon`](crate::geom::validate_polygon) on untrusted input.
    pub fn new(corners: Vec<Vec2>) -> Self {
        debug_assert!(corners.len() >= 3, "convex polygon needs at least 3 corners");
        ConvexPolygon { corners }
    }

    /// The corners in counter-clockwise order
    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }

    /// Consume the polygon, returning its corners
    pub fn into_corners(self) -> Vec<Vec2> {
        self.corners
    }

    /// Derived vertices
    pub fn vertices(&self) -> Vec<Vertex2> {
        Vertex2::from_corners(&self.corners)
    }

    /// Enclosed area
    pub fn area(&self) -> f64 {
        polygon::signed_area(&self.corners)
    }

    /// Second moment of area about the centroid
    pub fn inertial_area(&self) -> f64 {
        polygon::inertial_area(&self.corners)
    }

    /// Area centroid
    pub fn center_of_mass(&self) -> Vec2 {
        polygon::center_of_mass(&self.corners)
    }

    /// Axis-aligned bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        polygon::bounding_box(&self.corners)
    }

    /// Half-plane containment test; boundary points are inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        polygon::convex_contains_point(&self.corners, point)
    }

    /// Outward edge normals, the candidate separating axes
    pub fn sat_directions(&self) -> Vec<NormalizedVec2> {
        polygon::edge_normals(&self.corners)
    }

    /// Projection of the polygon onto `direction`
    pub fn bounds_along_direction(&self, direction: NormalizedVec2) -> Range {
        polygon::bounds_along_direction(&self.corners, direction)
            .unwrap_or(Range::new(0.0, 0.0))
    }

    /// Map through a frame
    pub fn transform_to_cframe(&self, frame: &CFrame) -> ConvexPolygon {
        ConvexPolygon {
            corners: polygon::transformed(&self.corners, frame),
        }
    }

    /// Scale about the local origin
    pub fn scale(&self, factor: f64) -> ConvexPolygon {
        ConvexPolygon {
            corners: polygon::scaled(&self.corners, factor),
        }
    }

    /// SAT overlap test against another convex polygon
    pub fn intersects(&self, other: &ConvexPolygon) -> bool {
        collision::intersects(self, other)
    }

    /// Shortest translation moving `self` out of `other`
    ///
    /// See [`collision::nearest_exit`].
    pub fn nearest_exit(&self, other: &ConvexPolygon) -> Option<Vec2> {
        collision::nearest_exit(self, other)
    }

    /// Exact intersection, `None` when the polygons do not overlap
    pub fn intersection(&self, other: &ConvexPolygon) -> Option<ConvexPolygon> {
        let corners = clip::convex_intersection(&self.corners, &other.corners);
        polygon::has_area(&corners).then(|| ConvexPolygon { corners })
    }

    /// The part of this polygon left of the directed line, `None` if nothing remains
    pub fn left_slice(&self, origin: Vec2, direction: Vec2) -> Option<ConvexPolygon> {
        let corners = clip::left_slice(&self.corners, origin, direction);
        polygon::has_area(&corners).then(|| ConvexPolygon { corners })
    }

    /// Fan triangulation from the first corner
    pub fn triangulate(&self) -> Vec<Triangle> {
        let c = &self.corners;
        (1..c.len().saturating_sub(1))
            .map(|i| Triangle::new(c[0], c[i], c[i + 1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn hexagon() -> ConvexPolygon {
        ConvexPolygon::new(vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(0.5, 1.1),
            Vec2::new(-0.3, 0.5),
            Vec2::new(-0.1, -0.5),
            Vec2::new(0.4, -0.6),
            Vec2::new(0.7, 0.0),
        ])
    }

    #[test]
    fn test_triangulation_preserves_area() {
        let hex = hexagon();
        let tris = hex.triangulate();
        assert_eq!(tris.len(), 4);
        let total: f64 = tris.iter().map(|t| t.area()).sum();
        assert!((total - hex.area()).abs() < EPS);
    }

    #[test]
    fn test_intersection_with_self() {
        let hex = hexagon();
        let inter = hex.intersection(&hex).unwrap();
        assert!((inter.area() - hex.area()).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_intersection_is_none() {
        let hex = hexagon();
        let far = hex.transform_to_cframe(&CFrame::from_position(Vec2::new(10.0, 0.0)));
        assert!(hex.intersection(&far).is_none());
        assert!(!hex.intersects(&far));
        assert!(hex.nearest_exit(&far).is_none());
    }

    #[test]
    fn test_contains_centroid() {
        let hex = hexagon();
        assert!(hex.contains_point(hex.center_of_mass()));
        assert!(!hex.contains_point(Vec2::new(2.0, 2.0)));
    }
}
