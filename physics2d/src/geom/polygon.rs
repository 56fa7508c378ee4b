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
//! Polygon-integral kernels and the general simple polygon
//!
//! The free functions in this module operate on a counter-clockwise corner
//! slice and are shared by every polygonal shape variant. Primitives override
//! area and inertia with closed forms but fall back to these for everything
//! else.
//!
//! # Formulas
//!
//! All integrals are summed edge by edge over `(c[i], c[i+1])` with
//! `k = c[i] x c[i+1]`:
//!
//! - signed area: `sum(k) / 2`
//! - centroid: `sum((c[i] + c[i+1]) * k) / (6 * area)`
//! - polar second moment about the origin:
//!   `sum(k * (c[i].c[i] + c[i].c[i+1] + c[i+1].c[i+1])) / 12`
//!
//! The moment about the centroid follows from the parallel axis theorem.
//! Clockwise input negates the area, which callers must guard against with
//! [`validate_polygon`](crate::geom::validate_polygon).

use crate::error::GeometryResult;
use crate::math::{BoundingBox, CFrame, NormalizedVec2, Range, Vec2, Vertex2};

use super::convex::ConvexPolygon;
use super::decompose::convex_decomposition;

/// Signed area; positive for counter-clockwise winding
pub fn signed_area(corners: &[Vec2]) -> f64 {
    let n = corners.len();
    let mut total = 0.0;
    for i in 0..n {
        total += corners[i].cross(corners[(i + 1) % n]);
    }
    total / 2.0
}

/// Area centroid
///
/// Degenerate polygons with zero area fall back to the corner average.
pub fn center_of_mass(corners: &[Vec2]) -> Vec2 {
    let n = corners.len();
    let mut weighted = Vec2::ZERO;
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = corners[i];
        let b = corners[(i + 1) % n];
        let k = a.cross(b);
        weighted += (a + b) * k;
        twice_area += k;
    }
    if twice_area == 0.0 {
        return Vec2::average(corners).unwrap_or(Vec2::ZERO);
    }
    weighted / (3.0 * twice_area)
}

/// Polar second moment of area about the centroid
pub fn inertial_area(corners: &[Vec2]) -> f64 {
    let n = corners.len();
    let mut about_origin = 0.0;
    for i in 0..n {
        let a = corners[i];
        let b = corners[(i + 1) % n];
        about_origin += a.cross(b) * (a.dot(a) + a.dot(b) + b.dot(b));
    }
    about_origin /= 12.0;
    about_origin - signed_area(corners) * center_of_mass(corners).length_squared()
}

/// Crossing-number point containment for any simple polygon
///
/// A ray from `point` towards +x toggles the result at each edge it crosses.
/// Edges are half-open in y: a corner lying exactly on the ray belongs only to
/// the edges that continue above it, so a ray through a corner counts once
/// when the neighbouring edges straddle it and not at all when they touch it
/// from one side. Horizontal edges never count.
pub fn contains_point(corners: &[Vec2], point: Vec2) -> bool {
    let n = corners.len();
    let mut inside = false;
    for i in 0..n {
        let current = corners[i] - point;
        let next = corners[(i + 1) % n] - point;

        if (current.y > 0.0) != (next.y > 0.0) {
            let crossing_x = current.x - current.y * (next.x - current.x) / (next.y - current.y);
            if crossing_x > 0.0 {
                inside = !inside;
            }
        }
    }
    inside
}

/// Point containment for a convex polygon
///
/// The point is inside when it lies on the inner side of every edge. Points on
/// the boundary count as inside.
pub fn convex_contains_point(corners: &[Vec2], point: Vec2) -> bool {
    let n = corners.len();
    if n == 0 {
        return false;
    }
    let mut current = corners[n - 1];
    for &next in corners {
        if (current - point).cross(next - current) < 0.0 {
            return false;
        }
        current = next;
    }
    true
}

/// Areas below this fraction of the squared extent count as zero
const SLIVER_TOLERANCE: f64 = 1e-12;

/// Whether the corners enclose a positive counter-clockwise area
///
/// Slivers, such as the segment left where two polygons touch along an edge,
/// have an area negligible next to their squared extent and do not count.
pub fn has_area(corners: &[Vec2]) -> bool {
    encloses_area(corners, extent(corners))
}

/// [`has_area`] measured against the extent of some larger polygon
pub(crate) fn encloses_area(corners: &[Vec2], scale: f64) -> bool {
    corners.len() >= 3 && signed_area(corners) > SLIVER_TOLERANCE * scale * scale
}

/// Larger side of the bounding box, 0 for no corners
pub(crate) fn extent(corners: &[Vec2]) -> f64 {
    BoundingBox::from_points(corners.iter().copied()).map_or(0.0, |b| b.width().max(b.height()))
}

/// Check that every corner turns counter-clockwise or straight
pub fn is_convex(corners: &[Vec2]) -> bool {
    let n = corners.len();
    (0..n).all(|i| {
        let prev = corners[(i + n - 1) % n];
        let cur = corners[i];
        let next = corners[(i + 1) % n];
        (cur - prev).cross(next - cur) >= 0.0
    })
}

/// Axis-aligned box around the corners
///
/// # Panics
///
/// Panics in debug builds if `corners` is empty
pub fn bounding_box(corners: &[Vec2]) -> BoundingBox {
    debug_assert!(!corners.is_empty(), "bounding box of an empty polygon");
    BoundingBox::from_points(corners.iter().copied())
        .unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0))
}

/// Project every corner onto `direction`
pub fn bounds_along_direction(corners: &[Vec2], direction: NormalizedVec2) -> Option<Range> {
    Range::from_values(corners.iter().map(|c| direction.dot(*c)))
}

/// Outward unit normal of every edge, in corner order
pub fn edge_normals(corners: &[Vec2]) -> Vec<NormalizedVec2> {
    let n = corners.len();
    (0..n)
        .filter_map(|i| (corners[(i + 1) % n] - corners[i]).rotate90_clockwise().try_normalize())
        .collect()
}

/// Map every corner through a frame
pub fn transformed(corners: &[Vec2], frame: &CFrame) -> Vec<Vec2> {
    corners.iter().map(|c| frame.local_to_global(*c)).collect()
}

/// Scale every corner about the local origin
pub fn scaled(corners: &[Vec2], factor: f64) -> Vec<Vec2> {
    corners.iter().map(|c| *c * factor).collect()
}

/// Rotate a corner list so that it starts at `offset`
pub fn shifted(corners: &[Vec2], offset: usize) -> Vec<Vec2> {
    let n = corners.len();
    (0..n).map(|i| corners[(i + offset) % n]).collect()
}

fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (b - a).cross(c - a)
}

/// Check whether two closed segments share any point
pub(crate) fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// Whether `p`, already known to be collinear with `a`-`b`, lies between them
pub(crate) fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// A general simple polygon
///
/// The outline may be concave. Its convex decomposition is computed once at
/// construction, which also rejects outlines whose concave corners cannot be
/// bridged.
///
/// # Examples
///
/// ```
/// use physics2d::geom::Polygon;
/// use physics2d::math::Vec2;
///
/// let l_shape = Polygon::new(vec![
///     Vec2::new(0.0, 0.0),
///     Vec2::new(2.0, 0.0),
///     Vec2::new(2.0, 1.0),
///     Vec2::new(1.0, 1.0),
///     Vec2::new(1.0, 2.0),
///     Vec2::new(0.0, 2.0),
/// ])
/// .unwrap();
/// assert!((l_shape.area() - 3.0).abs() < 1e-12);
/// assert!(l_shape.pieces().len() >= 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    corners: Vec<Vec2>,
    pieces: Vec<ConvexPolygon>,
}

impl Polygon {
    /// Create a polygon from counter-clockwise corners
    pub fn new(corners: Vec<Vec2>) -> GeometryResult<Self> {
        let pieces = convex_decomposition(&corners)?
            .into_iter()
            .map(ConvexPolygon::new)
            .collect();
        Ok(Polygon { corners, pieces })
    }

    /// The outline corners
    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }

    /// Derived vertices of the outline
    pub fn vertices(&self) -> Vec<Vertex2> {
        Vertex2::from_corners(&self.corners)
    }

    /// Cached convex pieces
    pub fn pieces(&self) -> &[ConvexPolygon] {
        &self.pieces
    }

    /// Area of the outline
    pub fn area(&self) -> f64 {
        signed_area(&self.corners)
    }

    /// Second moment of area about the centroid
    pub fn inertial_area(&self) -> f64 {
        inertial_area(&self.corners)
    }

    /// Centroid of the outline
    pub fn center_of_mass(&self) -> Vec2 {
        center_of_mass(&self.corners)
    }

    /// Crossing-number containment test
    pub fn contains_point(&self, point: Vec2) -> bool {
        contains_point(&self.corners, point)
    }

    /// Map the polygon and its pieces through a frame
    pub fn transform_to_cframe(&self, frame: &CFrame) -> Polygon {
        Polygon {
            corners: transformed(&self.corners, frame),
            pieces: self
                .pieces
                .iter()
                .map(|p| p.transform_to_cframe(frame))
                .collect(),
        }
    }

    /// Scale about the local origin
    pub fn scale(&self, factor: f64) -> Polygon {
        Polygon {
            corners: scaled(&self.corners, factor),
            pieces: self.pieces.iter().map(|p| p.scale(factor)).collect(),
        }
    }
}
