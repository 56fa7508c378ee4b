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
//! The closed set of shape kinds
//!
//! [`Shape`] dispatches every geometric query to its variant. `Shape::Null`
//! is the empty shape: it contains nothing, has no area and no bounding box,
//! and is the result of any clip or intersection that leaves nothing behind.
//!
//! # Set operations
//!
//! | operation | with `Null` | otherwise |
//! |---|---|---|
//! | `union` | the other shape | composite of both decompositions |
//! | `intersection` | `Null` | clipped pieces, `Null` if none overlap |
//! | `left_slice` | `Null` | sliced pieces, the shape itself if untouched |

use crate::math::{BoundingBox, CFrame, NormalizedVec2, Range, Vec2, Vertex2};

use super::clip;
use super::collision;
use super::composite::CompositePolygon;
use super::convex::ConvexPolygon;
use super::polygon::{self, Polygon};
use super::primitives::{Rectangle, RegularPolygon, Triangle};

/// Any shape a part can have
///
/// # Examples
///
/// ```
/// use physics2d::geom::{Rectangle, Shape};
/// use physics2d::math::Vec2;
///
/// let a = Shape::from(Rectangle::new(2.0, 2.0));
/// let b = a.transform_to_cframe(&physics2d::math::CFrame::from_position(Vec2::new(1.0, 1.0)));
///
/// let overlap = a.intersection(&b);
/// assert!((overlap.area() - 1.0).abs() < 1e-12);
/// assert!(a.intersection(&Shape::Null).is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Shape {
    /// General simple polygon
    Polygon(Polygon),
    /// Convex polygon
    Convex(ConvexPolygon),
    /// Several convex pieces, possibly disjoint
    Composite(CompositePolygon),
    /// Placed rectangle
    Rectangle(Rectangle),
    /// Triangle
    Triangle(Triangle),
    /// Regular polygon
    RegularPolygon(RegularPolygon),
    /// The empty shape
    #[default]
    Null,
}

impl Shape {
    /// Whether this is the empty shape
    pub fn is_null(&self) -> bool {
        matches!(self, Shape::Null)
    }

    /// Whether the shape is a single convex region
    pub fn is_convex(&self) -> bool {
        match self {
            Shape::Polygon(p) => p.pieces().len() == 1,
            Shape::Convex(_) | Shape::Rectangle(_) | Shape::Triangle(_) | Shape::RegularPolygon(_) => {
                true
            }
            Shape::Composite(c) => c.pieces().len() == 1 && c.outlines().len() == 1,
            Shape::Null => false,
        }
    }

    /// Point containment; boundary points of convex shapes count as inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Shape::Polygon(p) => p.contains_point(point),
            Shape::Convex(c) => c.contains_point(point),
            Shape::Composite(c) => c.contains_point(point),
            Shape::Rectangle(r) => r.contains_point(point),
            Shape::Triangle(t) => polygon::convex_contains_point(t.corners(), point),
            Shape::RegularPolygon(r) => polygon::convex_contains_point(&r.corners(), point),
            Shape::Null => false,
        }
    }

    /// Enclosed area
    pub fn area(&self) -> f64 {
        match self {
            Shape::Polygon(p) => p.area(),
            Shape::Convex(c) => c.area(),
            Shape::Composite(c) => c.area(),
            Shape::Rectangle(r) => r.area(),
            Shape::Triangle(t) => t.area(),
            Shape::RegularPolygon(r) => r.area(),
            Shape::Null => 0.0,
        }
    }

    /// Polar second moment of area about the centroid
    pub fn inertial_area(&self) -> f64 {
        match self {
            Shape::Polygon(p) => p.inertial_area(),
            Shape::Convex(c) => c.inertial_area(),
            Shape::Composite(c) => c.inertial_area(),
            Shape::Rectangle(r) => r.inertial_area(),
            Shape::Triangle(t) => t.inertial_area(),
            Shape::RegularPolygon(r) => r.inertial_area(),
            Shape::Null => 0.0,
        }
    }

    /// Area centroid; the origin for `Null`
    pub fn center_of_mass(&self) -> Vec2 {
        match self {
            Shape::Polygon(p) => p.center_of_mass(),
            Shape::Convex(c) => c.center_of_mass(),
            Shape::Composite(c) => c.center_of_mass(),
            Shape::Rectangle(r) => r.center_of_mass(),
            Shape::Triangle(t) => t.center_of_mass(),
            Shape::RegularPolygon(r) => r.center_of_mass(),
            Shape::Null => Vec2::ZERO,
        }
    }

    /// Axis-aligned bounding box, `None` for `Null`
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self {
            Shape::Composite(c) => c.bounding_box(),
            Shape::Rectangle(r) => Some(r.bounding_box()),
            Shape::Null => None,
            _ => BoundingBox::from_points(self.corners()),
        }
    }

    /// The shape mapped through a frame; primitives stay primitives
    pub fn transform_to_cframe(&self, frame: &CFrame) -> Shape {
        match self {
            Shape::Polygon(p) => Shape::Polygon(p.transform_to_cframe(frame)),
            Shape::Convex(c) => Shape::Convex(c.transform_to_cframe(frame)),
            Shape::Composite(c) => Shape::Composite(c.transform_to_cframe(frame)),
            Shape::Rectangle(r) => Shape::Rectangle(r.transform_to_cframe(frame)),
            Shape::Triangle(t) => Shape::Triangle(t.transform_to_cframe(frame)),
            Shape::RegularPolygon(r) => Shape::RegularPolygon(r.transform_to_cframe(frame)),
            Shape::Null => Shape::Null,
        }
    }

    /// Uniform scale about the origin
    pub fn scale(&self, factor: f64) -> Shape {
        match self {
            Shape::Polygon(p) => Shape::Polygon(p.scale(factor)),
            Shape::Convex(c) => Shape::Convex(c.scale(factor)),
            Shape::Composite(c) => Shape::Composite(c.scale(factor)),
            Shape::Rectangle(r) => Shape::Rectangle(r.scale(factor)),
            Shape::Triangle(t) => Shape::Triangle(t.scale(factor)),
            Shape::RegularPolygon(r) => Shape::RegularPolygon(r.scale(factor)),
            Shape::Null => Shape::Null,
        }
    }

    /// Candidate separating axes
    ///
    /// Non-convex shapes report the axes of all their pieces.
    pub fn sat_directions(&self) -> Vec<NormalizedVec2> {
        match self {
            Shape::Rectangle(r) => r.sat_directions(),
            Shape::Convex(c) => c.sat_directions(),
            Shape::Triangle(t) => polygon::edge_normals(t.corners()),
            Shape::RegularPolygon(r) => polygon::edge_normals(&r.corners()),
            Shape::Polygon(_) | Shape::Composite(_) => self
                .convex_decomposition()
                .iter()
                .flat_map(|p| p.sat_directions())
                .collect(),
            Shape::Null => Vec::new(),
        }
    }

    /// Projection onto `direction`, `None` for `Null`
    pub fn bounds_along_direction(&self, direction: NormalizedVec2) -> Option<Range> {
        match self {
            Shape::Rectangle(r) => Some(r.bounds_along_direction(direction)),
            Shape::Composite(c) => Range::from_values(
                c.pieces()
                    .iter()
                    .flat_map(|p| p.corners().iter().map(move |v| direction.dot(*v))),
            ),
            Shape::Null => None,
            _ => polygon::bounds_along_direction(&self.corners(), direction),
        }
    }

    /// Convex pieces that tile the shape; empty for `Null`
    pub fn convex_decomposition(&self) -> Vec<ConvexPolygon> {
        match self {
            Shape::Polygon(p) => p.pieces().to_vec(),
            Shape::Convex(c) => vec![c.clone()],
            Shape::Composite(c) => c.pieces().to_vec(),
            Shape::Rectangle(r) => vec![r.to_convex()],
            Shape::Triangle(t) => vec![t.to_convex()],
            Shape::RegularPolygon(r) => vec![r.to_convex()],
            Shape::Null => Vec::new(),
        }
    }

    /// Outline corners in counter-clockwise order
    ///
    /// A composite reports its first outline; `Null` has no corners.
    pub fn corners(&self) -> Vec<Vec2> {
        match self {
            Shape::Polygon(p) => p.corners().to_vec(),
            Shape::Convex(c) => c.corners().to_vec(),
            Shape::Composite(c) => c.outlines().first().cloned().unwrap_or_default(),
            Shape::Rectangle(r) => r.corners(),
            Shape::Triangle(t) => t.corners().to_vec(),
            Shape::RegularPolygon(r) => r.corners(),
            Shape::Null => Vec::new(),
        }
    }

    /// Every outline of the shape
    pub fn outlines(&self) -> Vec<Vec<Vec2>> {
        match self {
            Shape::Composite(c) => c.outlines().to_vec(),
            Shape::Null => Vec::new(),
            _ => vec![self.corners()],
        }
    }

    /// Derived vertices of the outline
    pub fn vertices(&self) -> Vec<Vertex2> {
        Vertex2::from_corners(&self.corners())
    }

    /// Corners to hand to a renderer
    pub fn drawing_vertices(&self) -> Vec<Vec2> {
        self.corners()
    }

    /// Overlap test against another shape
    pub fn intersects(&self, other: &Shape) -> bool {
        collision::shapes_intersect(self, other)
    }

    /// Shape covering both operands
    pub fn union(&self, other: &Shape) -> Shape {
        match (self, other) {
            (Shape::Null, _) => other.clone(),
            (_, Shape::Null) => self.clone(),
            _ => {
                let mut outlines = self.outlines();
                outlines.extend(other.outlines());
                let mut pieces = self.convex_decomposition();
                pieces.extend(other.convex_decomposition());
                Shape::Composite(CompositePolygon::from_regions(outlines, pieces))
            }
        }
    }

    /// Region covered by both operands
    pub fn intersection(&self, other: &Shape) -> Shape {
        if self.is_null() || other.is_null() {
            return Shape::Null;
        }

        if self.is_convex() && other.is_convex() {
            let corners = clip::convex_intersection(&self.corners(), &other.corners());
            return Shape::from_corners(corners);
        }

        let ours = self.convex_decomposition();
        let theirs = other.convex_decomposition();
        let pieces: Vec<ConvexPolygon> = ours
            .iter()
            .flat_map(|a| theirs.iter().filter_map(move |b| a.intersection(b)))
            .collect();
        Shape::from_pieces(pieces)
    }

    /// Region left of the directed line through `origin`
    ///
    /// Returns the shape itself when the line does not cut it.
    pub fn left_slice(&self, origin: Vec2, direction: Vec2) -> Shape {
        if self.is_null() {
            return Shape::Null;
        }

        if self.is_convex() {
            let corners = self.corners();
            let sliced = clip::left_slice(&corners, origin, direction);
            if sliced == corners {
                return self.clone();
            }
            return Shape::from_corners(sliced);
        }

        let pieces = self.convex_decomposition();
        let sliced: Vec<ConvexPolygon> = pieces
            .iter()
            .filter_map(|p| p.left_slice(origin, direction))
            .collect();
        if sliced == pieces {
            return self.clone();
        }
        Shape::from_pieces(sliced)
    }

    fn from_corners(corners: Vec<Vec2>) -> Shape {
        if !polygon::has_area(&corners) {
            Shape::Null
        } else {
            Shape::Convex(ConvexPolygon::new(corners))
        }
    }

    fn from_pieces(mut pieces: Vec<ConvexPolygon>) -> Shape {
        match pieces.len() {
            0 => Shape::Null,
            1 => pieces.pop().map_or(Shape::Null, Shape::Convex),
            _ => Shape::Composite(CompositePolygon::from_pieces(pieces)),
        }
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}

impl From<ConvexPolygon> for Shape {
    fn from(c: ConvexPolygon) -> Self {
        Shape::Convex(c)
    }
}

impl From<CompositePolygon> for Shape {
    fn from(c: CompositePolygon) -> Self {
        Shape::Composite(c)
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl From<Triangle> for Shape {
    fn from(t: Triangle) -> Self {
        Shape::Triangle(t)
    }
}

impl From<RegularPolygon> for Shape {
    fn from(r: RegularPolygon) -> Self {
        Shape::RegularPolygon(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn l_shape() -> Shape {
        Shape::from(
            Polygon::new(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(2.0, 0.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 2.0),
                Vec2::new(0.0, 2.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_null_behaviour() {
        let null = Shape::Null;
        let square = Shape::from(Rectangle::new(1.0, 1.0));

        assert!(!null.contains_point(Vec2::ZERO));
        assert_eq!(null.area(), 0.0);
        assert_eq!(null.inertial_area(), 0.0);
        assert!(null.bounding_box().is_none());
        assert!(null.convex_decomposition().is_empty());
        assert!(null.transform_to_cframe(&CFrame::new(Vec2::new(1.0, 2.0), 0.3)).is_null());
        assert!(null.scale(3.0).is_null());
        assert!(null.left_slice(Vec2::ZERO, Vec2::new(1.0, 0.0)).is_null());

        assert_eq!(null.union(&square), square);
        assert_eq!(square.union(&null), square);
        assert!(square.intersection(&null).is_null());
        assert!(null.intersection(&square).is_null());
    }

    #[test]
    fn test_primitives_keep_variant_under_transform() {
        let frame = CFrame::new(Vec2::new(1.0, -1.0), 0.7);
        let rect = Shape::from(Rectangle::new(1.0, 2.0)).transform_to_cframe(&frame);
        assert!(matches!(rect, Shape::Rectangle(_)));
        let tri = Shape::from(Triangle::from_base_and_top(1.0, Vec2::new(0.0, 1.0))).scale(2.0);
        assert!(matches!(tri, Shape::Triangle(_)));
    }

    #[test]
    fn test_area_invariant_under_transform() {
        let frame = CFrame::new(Vec2::new(3.0, 4.0), 1.1);
        for shape in [
            l_shape(),
            Shape::from(Rectangle::new(0.3, 0.7)),
            Shape::from(RegularPolygon::new(5, Vec2::new(0.4, 0.1))),
        ] {
            let moved = shape.transform_to_cframe(&frame);
            assert!((moved.area() - shape.area()).abs() < 1e-10);
            assert!((moved.inertial_area() - shape.inertial_area()).abs() < 1e-10);
            let com = frame.local_to_global(shape.center_of_mass());
            assert!((moved.center_of_mass() - com).length() < 1e-10);
        }
    }

    #[test]
    fn test_concave_polygon_intersection() {
        let l = l_shape();
        let square = Shape::from(Rectangle::with_frame(
            2.0,
            2.0,
            CFrame::from_position(Vec2::new(1.5, 1.5)),
        ));
        // the square overlaps both arms of the L
        let overlap = l.intersection(&square);
        assert!((overlap.area() - 1.25).abs() < EPS);
        assert!(overlap.contains_point(Vec2::new(0.75, 1.5)));
        assert!(!overlap.contains_point(Vec2::new(1.5, 1.5)));
    }

    #[test]
    fn test_union_concatenates_pieces() {
        let a = Shape::from(Rectangle::new(1.0, 1.0));
        let b = a.transform_to_cframe(&CFrame::from_position(Vec2::new(5.0, 0.0)));
        let u = a.union(&b);
        assert!(matches!(u, Shape::Composite(_)));
        assert_eq!(u.convex_decomposition().len(), 2);
        assert!((u.area() - 2.0).abs() < EPS);
        assert!(u.contains_point(Vec2::new(5.0, 0.0)));
        assert_eq!(u.outlines().len(), 2);
    }

    #[test]
    fn test_left_slice_untouched_returns_same_shape() {
        let rect = Shape::from(Rectangle::new(1.0, 1.0));
        let same = rect.left_slice(Vec2::new(5.0, 0.0), Vec2::new(0.0, 1.0));
        assert_eq!(same, rect);
        let gone = rect.left_slice(Vec2::new(5.0, 0.0), Vec2::new(0.0, -1.0));
        assert!(gone.is_null());
    }

    #[test]
    fn test_touching_results_are_null() {
        let square = Shape::from(Rectangle::new(2.0, 2.0));
        assert!(square.left_slice(Vec2::new(1.0, 1.0), Vec2::new(1.0, -1.0)).is_null());

        let beside = square.transform_to_cframe(&CFrame::from_position(Vec2::new(2.0, 0.0)));
        assert!(square.intersection(&beside).is_null());
        let diagonal = square.transform_to_cframe(&CFrame::from_position(Vec2::new(2.0, 2.0)));
        assert!(square.intersection(&diagonal).is_null());

        // concave shapes go through their pieces
        let l = l_shape();
        let above = Shape::from(Rectangle::with_frame(2.0, 1.0, CFrame::from_position(Vec2::new(1.0, 2.5))));
        assert!(l.intersection(&above).is_null());
        assert!(l.left_slice(Vec2::ZERO, Vec2::new(0.0, 1.0)).is_null());
    }

    #[test]
    fn test_left_slice_concave() {
        let l = l_shape();
        // keep x <= 0.5
        let sliced = l.left_slice(Vec2::new(0.5, 0.0), Vec2::new(0.0, 1.0));
        assert!((sliced.area() - 1.0).abs() < EPS);
        assert!(sliced.contains_point(Vec2::new(0.25, 1.5)));
        assert!(!sliced.contains_point(Vec2::new(1.5, 0.5)));
    }

    #[test]
    fn test_bounds_along_direction() {
        let rect = Shape::from(Rectangle::new(2.0, 1.0));
        let r = rect.bounds_along_direction(NormalizedVec2::UNIT_X).unwrap();
        assert!((r.min + 1.0).abs() < EPS && (r.max - 1.0).abs() < EPS);
        assert!(Shape::Null.bounds_along_direction(NormalizedVec2::UNIT_X).is_none());
    }
}
