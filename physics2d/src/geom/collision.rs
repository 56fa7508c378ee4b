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
//! Separating-axis collision queries
//!
//! Two convex polygons overlap exactly when their projections overlap on every
//! edge normal of both. [`nearest_exit`] reuses the same projections to find
//! the shortest push that separates them.

use crate::math::Vec2;

use super::convex::ConvexPolygon;
use super::shape::Shape;

/// SAT overlap test
///
/// Touching polygons (projections sharing only an endpoint) count as
/// overlapping.
pub fn intersects(a: &ConvexPolygon, b: &ConvexPolygon) -> bool {
    a.sat_directions()
        .into_iter()
        .chain(b.sat_directions())
        .all(|dir| {
            !a.bounds_along_direction(dir)
                .is_disjunct(&b.bounds_along_direction(dir))
        })
}

/// Shortest translation that moves `a` out of `b`
///
/// Only the edge normals of `a` are tried. For each normal the two ways out
/// (along the normal or against it) are compared and the shorter kept; the
/// overall shortest candidate is returned. `None` means some normal already
/// separates the polygons.
///
/// # Examples
///
/// ```
/// use physics2d::geom::{collision::nearest_exit, Rectangle};
/// use physics2d::math::{CFrame, Vec2};
///
/// let a = Rectangle::new(2.0, 2.0).to_convex();
/// let b = Rectangle::with_frame(2.0, 2.0, CFrame::from_position(Vec2::new(1.5, 0.0)))
///     .to_convex();
/// let exit = nearest_exit(&a, &b).unwrap();
/// assert!((exit - Vec2::new(-0.5, 0.0)).length() < 1e-12);
/// ```
pub fn nearest_exit(a: &ConvexPolygon, b: &ConvexPolygon) -> Option<Vec2> {
    let mut best: Option<Vec2> = None;
    for dir in a.sat_directions() {
        let ra = a.bounds_along_direction(dir);
        let rb = b.bounds_along_direction(dir);
        if ra.is_disjunct(&rb) {
            return None;
        }

        let forward = rb.max - ra.min;
        let backward = ra.max - rb.min;
        let candidate = if forward < backward {
            dir * forward
        } else {
            dir * -backward
        };

        match best {
            Some(b) if b.length_squared() <= candidate.length_squared() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Overlap test for arbitrary shapes
///
/// Compares bounding boxes first, then every pair of convex pieces whose boxes
/// overlap.
pub fn shapes_intersect(a: &Shape, b: &Shape) -> bool {
    let (Some(box_a), Some(box_b)) = (a.bounding_box(), b.bounding_box()) else {
        return false;
    };
    if !box_a.intersects(&box_b) {
        return false;
    }

    let pieces_a = a.convex_decomposition();
    let pieces_b = b.convex_decomposition();
    pieces_a.iter().any(|pa| {
        let ba = pa.bounding_box();
        pieces_b
            .iter()
            .any(|pb| ba.intersects(&pb.bounding_box()) && intersects(pa, pb))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rectangle;
    use crate::math::CFrame;

    const EPS: f64 = 1e-12;

    fn square_at(x: f64, y: f64, angle: f64) -> ConvexPolygon {
        Rectangle::with_frame(1.0, 1.0, CFrame::new(Vec2::new(x, y), angle)).to_convex()
    }

    #[test]
    fn test_overlapping_squares_intersect() {
        let a = square_at(0.0, 0.0, 0.0);
        let b = square_at(0.5, 0.5, 0.3);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_separated_by_rotated_axis() {
        // the boxes overlap but a diagonal axis separates the polygons
        let a = square_at(0.0, 0.0, std::f64::consts::FRAC_PI_4);
        let b = square_at(1.1, 1.1, std::f64::consts::FRAC_PI_4);
        assert!(a.bounding_box().intersects(&b.bounding_box()));
        assert!(!intersects(&a, &b));
        assert!(nearest_exit(&a, &b).is_none());
    }

    #[test]
    fn test_nearest_exit_picks_shallow_axis() {
        let a = square_at(0.0, 0.0, 0.0);
        let b = square_at(0.9, 0.2, 0.0);
        let exit = nearest_exit(&a, &b).unwrap();
        assert!((exit - Vec2::new(-0.1, 0.0)).length() < EPS);
    }

    #[test]
    fn test_exit_actually_separates() {
        let a = square_at(0.0, 0.0, 0.1);
        let b = square_at(0.6, -0.3, -0.4);
        let exit = nearest_exit(&a, &b).unwrap();
        let moved = a.transform_to_cframe(&CFrame::from_position(exit * 1.000001));
        assert!(!intersects(&moved, &b));
    }

    #[test]
    fn test_shapes_intersect_respects_null() {
        let a = Shape::from(Rectangle::new(1.0, 1.0));
        assert!(shapes_intersect(&a, &a));
        assert!(!shapes_intersect(&a, &Shape::Null));
        assert!(!shapes_intersect(&Shape::Null, &Shape::Null));
    }
}
