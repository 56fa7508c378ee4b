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
//! Convex decomposition of simple polygons
//!
//! A polygon with a concave corner `i` is split along a diagonal from `i` to
//! another corner `j`. The diagonal must leave both endpoints through the
//! polygon interior, must not touch any edge that is not incident to `i` or
//! `j`, and must not pass through another corner. Among valid diagonals the
//! shortest wins. Both halves go back on the worklist until every piece is
//! convex.
//!
//! A concave corner with no valid diagonal only happens on outlines that
//! self-intersect; that is reported as [`GeometryError::InvalidPolygon`].

use crate::error::{GeometryError, GeometryResult};
use crate::math::Vec2;

use super::polygon::{on_segment, segments_intersect};

/// Relative tolerance for classifying a corner as concave
const CONCAVE_EPSILON: f64 = 1e-12;

/// Split a counter-clockwise simple polygon into convex pieces
///
/// Convex input comes back as a single piece, unchanged. The pieces tile the
/// input exactly, so their areas sum to the input area.
///
/// # Examples
///
/// ```
/// use physics2d::geom::decompose::convex_decomposition;
/// use physics2d::math::Vec2;
///
/// let notch = vec![
///     Vec2::new(0.0, 0.0),
///     Vec2::new(2.0, 0.0),
///     Vec2::new(2.0, 2.0),
///     Vec2::new(1.0, 1.0),
///     Vec2::new(0.0, 2.0),
/// ];
/// let pieces = convex_decomposition(&notch).unwrap();
/// assert_eq!(pieces.len(), 2);
/// ```
pub fn convex_decomposition(corners: &[Vec2]) -> GeometryResult<Vec<Vec<Vec2>>> {
    if corners.len() < 3 {
        return Err(GeometryError::TooFewVertices {
            count: corners.len(),
        });
    }

    let mut pieces = Vec::new();
    let mut worklist = vec![corners.to_vec()];

    while let Some(polygon) = worklist.pop() {
        let Some(concave) = first_concave_corner(&polygon) else {
            pieces.push(polygon);
            continue;
        };

        let bridge = best_bridge(&polygon, concave)
            .ok_or(GeometryError::InvalidPolygon { vertex: concave })?;

        let (first, second) = split(&polygon, concave, bridge);
        worklist.push(second);
        worklist.push(first);
    }

    Ok(pieces)
}

/// Index of the first corner that turns clockwise, if any
pub fn first_concave_corner(corners: &[Vec2]) -> Option<usize> {
    let n = corners.len();
    (0..n).find(|&i| is_concave_at(corners, i))
}

fn is_concave_at(corners: &[Vec2], i: usize) -> bool {
    let n = corners.len();
    let prev = corners[(i + n - 1) % n];
    let cur = corners[i];
    let next = corners[(i + 1) % n];
    let incoming = cur - prev;
    let outgoing = next - cur;
    incoming.cross(outgoing) < -CONCAVE_EPSILON * incoming.length() * outgoing.length()
}

/// Whether `direction`, leaving `cur`, points into the polygon interior
///
/// The interior at a corner is the angular sector swept counter-clockwise from
/// the outgoing edge `next - cur` to the reversed incoming edge `prev - cur`.
fn lies_in_interior_cone(prev: Vec2, cur: Vec2, next: Vec2, direction: Vec2) -> bool {
    let a = next - cur;
    let b = prev - cur;
    let after_outgoing = a.cross(direction) > 0.0;
    let before_incoming = direction.cross(b) > 0.0;
    if a.cross(b) > 0.0 {
        after_outgoing && before_incoming
    } else {
        after_outgoing || before_incoming
    }
}

fn is_valid_bridge(corners: &[Vec2], i: usize, j: usize) -> bool {
    let n = corners.len();
    let from = corners[i];
    let to = corners[j];
    let direction = to - from;
    if direction.length_squared() == 0.0 {
        return false;
    }

    let at = |k: usize| corners[k % n];
    if !lies_in_interior_cone(at(i + n - 1), from, at(i + 1), direction)
        || !lies_in_interior_cone(at(j + n - 1), to, at(j + 1), -direction)
    {
        return false;
    }

    for k in 0..n {
        let k2 = (k + 1) % n;
        if k == i || k == j || k2 == i || k2 == j {
            continue;
        }
        if segments_intersect(from, to, corners[k], corners[k2]) {
            return false;
        }
    }

    // corners lying exactly on the diagonal, including ones on incident edges
    let scale = direction.length();
    (0..n).filter(|&m| m != i && m != j).all(|m| {
        let p = corners[m];
        let off_line = (p - from).cross(direction).abs() > CONCAVE_EPSILON * scale * scale;
        off_line || !on_segment(from, to, p)
    })
}

fn best_bridge(corners: &[Vec2], i: usize) -> Option<usize> {
    let n = corners.len();
    let from = corners[i];
    (0..n)
        .filter(|&j| j != i && j != (i + 1) % n && j != (i + n - 1) % n)
        .filter(|&j| is_valid_bridge(corners, i, j))
        .min_by(|&a, &b| {
            let da = (corners[a] - from).length_squared();
            let db = (corners[b] - from).length_squared();
            da.total_cmp(&db)
        })
}

/// Cut along the diagonal `i`-`j`, returning `i..=j` and `j..=i`
fn split(corners: &[Vec2], i: usize, j: usize) -> (Vec<Vec2>, Vec<Vec2>) {
    let n = corners.len();
    let walk = |from: usize, to: usize| {
        let count = (to + n - from) % n + 1;
        (0..count).map(|k| corners[(from + k) % n]).collect::<Vec<_>>()
    };
    (walk(i, j), walk(j, i))
}
