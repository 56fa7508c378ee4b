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
//! Primitive convex shapes with closed-form integrals
//!
//! Each primitive stays the same kind of primitive under rigid transforms and
//! uniform scaling. Everything that has no closed form falls back to the
//! polygon kernels on the generated corners.

use std::f64::consts::PI;

use crate::math::{BoundingBox, CFrame, NormalizedVec2, Range, RotMat2, Vec2};

use super::convex::ConvexPolygon;
use super::polygon;

/// A rectangle placed by a frame
///
/// Corners are generated counter-clockwise starting at the local
/// `(+w/2, +h/2)` corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
    frame: CFrame,
}

impl Rectangle {
    /// Axis-aligned rectangle centred on the origin
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_frame(width, height, CFrame::IDENTITY)
    }

    /// Rectangle centred on `frame`'s position, rotated with it
    pub fn with_frame(width: f64, height: f64, frame: CFrame) -> Self {
        Rectangle {
            width,
            height,
            frame,
        }
    }

    /// Extent along the local x axis
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along the local y axis
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Placement of the rectangle's centre
    pub fn frame(&self) -> CFrame {
        self.frame
    }

    /// Counter-clockwise corners
    pub fn corners(&self) -> Vec<Vec2> {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        [
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
        ]
        .into_iter()
        .map(|c| self.frame.local_to_global(c))
        .collect()
    }

    /// `width * height`
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// `w h (w^2 + h^2) / 12`
    pub fn inertial_area(&self) -> f64 {
        let (w, h) = (self.width, self.height);
        w * h * (w * w + h * h) / 12.0
    }

    /// The frame position
    pub fn center_of_mass(&self) -> Vec2 {
        self.frame.position()
    }

    /// Containment in local coordinates; the boundary is inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        let local = self.frame.global_to_local(point);
        local.x.abs() <= self.width / 2.0 && local.y.abs() <= self.height / 2.0
    }

    /// The two distinct edge normals
    pub fn sat_directions(&self) -> Vec<NormalizedVec2> {
        let x = self.frame.rotation().orientation();
        vec![x, x.rotate90_counterclockwise()]
    }

    /// Projection onto `direction`
    pub fn bounds_along_direction(&self, direction: NormalizedVec2) -> Range {
        polygon::bounds_along_direction(&self.corners(), direction)
            .unwrap_or(Range::new(0.0, 0.0))
    }

    /// Axis-aligned bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        polygon::bounding_box(&self.corners())
    }

    /// Compose `frame` with the rectangle's own frame
    pub fn transform_to_cframe(&self, frame: &CFrame) -> Rectangle {
        Rectangle {
            frame: frame.local_to_global_frame(&self.frame),
            ..*self
        }
    }

    /// Scale the size and the position about the origin
    pub fn scale(&self, factor: f64) -> Rectangle {
        Rectangle {
            width: self.width * factor,
            height: self.height * factor,
            frame: CFrame::from_parts(self.frame.position() * factor, self.frame.rotation()),
        }
    }

    /// The same rectangle as a generic convex polygon
    pub fn to_convex(&self) -> ConvexPolygon {
        ConvexPolygon::new(self.corners())
    }
}

/// A triangle with counter-clockwise corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    corners: [Vec2; 3],
}

impl Triangle {
    /// Triangle through three points
    ///
    /// Clockwise input is reordered so the stored winding is always
    /// counter-clockwise.
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        if (b - a).cross(c - a) < 0.0 {
            Triangle { corners: [a, c, b] }
        } else {
            Triangle { corners: [a, b, c] }
        }
    }

    /// Triangle on a base of the given width whose apex is `top`
    ///
    /// The base runs from `(-width/2, 0)` to `(width/2, 0)`; the result is
    /// shifted so that its centroid sits on the origin.
    pub fn from_base_and_top(width: f64, top: Vec2) -> Self {
        let shift = top / 3.0;
        Triangle::new(
            top - shift,
            Vec2::new(-width / 2.0, 0.0) - shift,
            Vec2::new(width / 2.0, 0.0) - shift,
        )
    }

    /// Counter-clockwise corners
    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }

    /// Enclosed area
    pub fn area(&self) -> f64 {
        polygon::signed_area(&self.corners)
    }

    /// Second moment of area about the centroid
    pub fn inertial_area(&self) -> f64 {
        polygon::inertial_area(&self.corners)
    }

    /// Mean of the three corners
    pub fn center_of_mass(&self) -> Vec2 {
        (self.corners[0] + self.corners[1] + self.corners[2]) / 3.0
    }

    /// Map through a frame
    pub fn transform_to_cframe(&self, frame: &CFrame) -> Triangle {
        Triangle {
            corners: self.corners.map(|c| frame.local_to_global(c)),
        }
    }

    /// Scale about the origin
    pub fn scale(&self, factor: f64) -> Triangle {
        Triangle {
            corners: self.corners.map(|c| c * factor),
        }
    }

    /// The same triangle as a generic convex polygon
    pub fn to_convex(&self) -> ConvexPolygon {
        ConvexPolygon::new(self.corners.to_vec())
    }
}

/// A regular polygon given by its centre and the offset of its first corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularPolygon {
    sides: usize,
    center: Vec2,
    start: Vec2,
}

impl RegularPolygon {
    /// Regular polygon centred on the origin with its first corner at `start`
    ///
    /// # Panics
    ///
    /// Panics if `sides < 3`
    pub fn new(sides: usize, start: Vec2) -> Self {
        Self::with_center(sides, Vec2::ZERO, start)
    }

    /// Regular polygon around `center`; `start` is relative to the centre
    ///
    /// # Panics
    ///
    /// Panics if `sides < 3`
    pub fn with_center(sides: usize, center: Vec2, start: Vec2) -> Self {
        assert!(sides >= 3, "a regular polygon needs at least 3 sides");
        RegularPolygon {
            sides,
            center,
            start,
        }
    }

    /// Number of corners
    pub fn sides(&self) -> usize {
        self.sides
    }

    /// Circumradius
    pub fn radius(&self) -> f64 {
        self.start.length()
    }

    /// Counter-clockwise corners
    pub fn corners(&self) -> Vec<Vec2> {
        let n = self.sides as f64;
        (0..self.sides)
            .map(|k| {
                let angle = 2.0 * PI * k as f64 / n;
                self.center + RotMat2::from_angle(angle) * self.start
            })
            .collect()
    }

    /// `n/2 r^2 sin(2 pi / n)`
    pub fn area(&self) -> f64 {
        let n = self.sides as f64;
        n / 2.0 * self.start.length_squared() * (2.0 * PI / n).sin()
    }

    /// `n r^4 sin(2 pi / n) (2 + cos(2 pi / n)) / 12`
    pub fn inertial_area(&self) -> f64 {
        let n = self.sides as f64;
        let r2 = self.start.length_squared();
        let theta = 2.0 * PI / n;
        n * r2 * r2 * theta.sin() * (2.0 + theta.cos()) / 12.0
    }

    /// The centre
    pub fn center_of_mass(&self) -> Vec2 {
        self.center
    }

    /// Map through a frame
    pub fn transform_to_cframe(&self, frame: &CFrame) -> RegularPolygon {
        RegularPolygon {
            center: frame.local_to_global(self.center),
            start: frame.local_to_global_vec(self.start),
            ..*self
        }
    }

    /// Scale about the origin
    pub fn scale(&self, factor: f64) -> RegularPolygon {
        RegularPolygon {
            center: self.center * factor,
            start: self.start * factor,
            ..*self
        }
    }

    /// The same polygon as a generic convex polygon
    pub fn to_convex(&self) -> ConvexPolygon {
        ConvexPolygon::new(self.corners())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_rectangle_matches_generic_formulas() {
        let r = Rectangle::with_frame(0.3, 0.2, CFrame::new(Vec2::new(1.0, -2.0), 0.4));
        let c = r.corners();
        assert!((r.area() - polygon::signed_area(&c)).abs() < EPS);
        assert!((r.inertial_area() - polygon::inertial_area(&c)).abs() < EPS);
        assert!((r.center_of_mass() - polygon::center_of_mass(&c)).length() < EPS);
    }

    #[test]
    fn test_rectangle_contains() {
        let r = Rectangle::with_frame(2.0, 1.0, CFrame::new(Vec2::ZERO, std::f64::consts::FRAC_PI_2));
        assert!(r.contains_point(Vec2::new(0.0, 0.9)));
        assert!(!r.contains_point(Vec2::new(0.9, 0.0)));
    }

    #[test]
    fn test_rectangle_transform_and_scale() {
        let r = Rectangle::new(2.0, 1.0);
        let frame = CFrame::new(Vec2::new(1.0, 1.0), 0.5);
        let moved = r.transform_to_cframe(&frame);
        assert_eq!(moved.width(), 2.0);
        assert!((moved.center_of_mass() - Vec2::new(1.0, 1.0)).length() < EPS);
        let scaled = moved.scale(2.0);
        assert!((scaled.area() - 8.0).abs() < EPS);
        assert!((scaled.center_of_mass() - Vec2::new(2.0, 2.0)).length() < EPS);
    }

    #[test]
    fn test_triangle_winding_is_normalized() {
        let t = Triangle::new(Vec2::ZERO, Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0));
        assert!((t.area() - 0.5).abs() < EPS);
    }

    #[test]
    fn test_triangle_from_base_and_top() {
        let t = Triangle::from_base_and_top(2.0, Vec2::new(0.3, 1.5));
        assert!(t.center_of_mass().length() < EPS);
        assert!((t.area() - 1.5).abs() < EPS);
        assert!((polygon::center_of_mass(t.corners())).length() < EPS);
    }

    #[test]
    fn test_regular_square_matches_rectangle() {
        let square = RegularPolygon::new(4, Vec2::new(1.0, 1.0));
        let rect = Rectangle::new(2.0, 2.0);
        assert!((square.area() - rect.area()).abs() < EPS);
        assert!((square.inertial_area() - rect.inertial_area()).abs() < EPS);
    }

    #[test]
    fn test_regular_polygon_matches_generic_formulas() {
        for sides in 3..10 {
            let p = RegularPolygon::with_center(sides, Vec2::new(0.5, -1.0), Vec2::new(0.7, 0.2));
            let c = p.corners();
            assert!((p.area() - polygon::signed_area(&c)).abs() < 1e-10);
            assert!((p.inertial_area() - polygon::inertial_area(&c)).abs() < 1e-10);
            assert!((p.center_of_mass() - polygon::center_of_mass(&c)).length() < 1e-10);
        }
    }

    #[test]
    #[should_panic(expected = "at least 3 sides")]
    fn test_regular_polygon_rejects_two_sides() {
        RegularPolygon::new(2, Vec2::new(1.0, 0.0));
    }
}
