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
//! Half-plane clipping of convex polygons
//!
//! [`left_slice`] keeps the part of a convex polygon to the left of a directed
//! line. A corner `p` is on the kept side when `(p - origin) x direction <= 0`.
//! [`convex_intersection`] is Sutherland-Hodgman clipping built on top of it.
//!
//! Both functions return a bare corner list. An empty list means nothing
//! survived; shape-level callers map that to [`Shape::Null`](super::Shape::Null).
//! A cut that leaves only a touching corner or edge also yields an empty list.

use crate::math::Vec2;

use super::polygon::{encloses_area, extent};

/// Clip a convex polygon to the left half-plane of a directed line
///
/// Walks the corner cycle once. At the edge where the polygon leaves the kept
/// side and the edge where it re-enters, the line/edge intersection is
/// inserted. If the line never crosses the polygon the result is either the
/// input unchanged (every corner kept) or empty (every corner discarded).
///
/// # Examples
///
/// ```
/// use physics2d::geom::clip::left_slice;
/// use physics2d::math::Vec2;
///
/// let square = [
///     Vec2::new(-1.0, -1.0),
///     Vec2::new(1.0, -1.0),
///     Vec2::new(1.0, 1.0),
///     Vec2::new(-1.0, 1.0),
/// ];
/// // keep the half with y >= 0
/// let top = left_slice(&square, Vec2::ZERO, Vec2::new(1.0, 0.0));
/// assert_eq!(top.len(), 4);
/// assert!(top.iter().all(|p| p.y >= 0.0));
/// ```
pub fn left_slice(polygon: &[Vec2], origin: Vec2, direction: Vec2) -> Vec<Vec2> {
    let n = polygon.len();
    if n == 0 {
        return Vec::new();
    }

    let mut enter: Option<(usize, Vec2)> = None;
    let mut leave: Option<(usize, Vec2)> = None;

    let mut first = polygon[n - 1];
    let mut first_side = (first - origin).cross(direction);

    for (i, &second) in polygon.iter().enumerate() {
        let second_side = (second - origin).cross(direction);

        if first_side > 0.0 && second_side <= 0.0 {
            leave = Some((i, Vec2::intersection(first, second - first, origin, direction)));
        } else if first_side <= 0.0 && second_side > 0.0 {
            enter = Some((i, Vec2::intersection(first, second - first, origin, direction)));
        }

        first = second;
        first_side = second_side;
    }

    let ((enter_index, enter_pos), (leave_index, leave_pos)) = match (enter, leave) {
        (Some(e), Some(l)) => (e, l),
        _ => {
            // no crossing: the whole polygon lies on one side
            return if first_side <= 0.0 {
                polygon.to_vec()
            } else {
                Vec::new()
            };
        }
    };

    let count = (enter_index + n - leave_index) % n + 2;
    let mut result = Vec::with_capacity(count);
    result.push(leave_pos);
    for k in 1..count - 1 {
        result.push(polygon[(leave_index + k - 1) % n]);
    }
    result.push(enter_pos);
    // measured against the input so rounding crumbs at a grazed corner vanish
    if encloses_area(&result, extent(polygon)) {
        result
    } else {
        Vec::new()
    }
}

/// Intersection of two convex polygons
///
/// Slices `a` by every directed edge of `b`; stops early once nothing is left.
pub fn convex_intersection(a: &[Vec2], b: &[Vec2]) -> Vec<Vec2> {
    let n = b.len();
    let mut current = a.to_vec();
    for i in 0..n {
        if current.is_empty() {
            break;
        }
        let origin = b[i];
        let direction = b[(i + 1) % n] - b[i];
        current = left_slice(&current, origin, direction);
    }
    current
}
