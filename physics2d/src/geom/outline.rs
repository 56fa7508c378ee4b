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
//! Minkowski collision outline
//!
//! Sliding polygon `b` around the boundary of polygon `a` traces an outline of
//! all positions of `b`'s centroid at which the two touch. Each outline point
//! remembers which corner of `a` it was traced from, so a centroid position
//! inside the outline can be mapped back to an approximate contact point on
//! `a`.
//!
//! This is an approximation; the contact resolver uses the centroid of the
//! exact intersection instead.

use crate::math::{Vec2, Vertex2};

use super::convex::ConvexPolygon;
use super::polygon::contains_point;

/// Outline traced by one convex polygon around another
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionOutline {
    outline: Vec<Vec2>,
    reference_points: Vec<Vec2>,
}

impl CollisionOutline {
    /// Trace `b` around `a`
    ///
    /// Returns `None` when no corner of `b` faces the first corner of `a`,
    /// which only happens for degenerate input.
    ///
    /// # Examples
    ///
    /// ```
    /// use physics2d::geom::{CollisionOutline, Rectangle};
    /// use physics2d::math::Vec2;
    ///
    /// let square = Rectangle::new(1.0, 1.0).to_convex();
    /// let outline = CollisionOutline::between(&square, &square).unwrap();
    /// assert_eq!(outline.outline().len(), 8);
    /// assert!(outline.collision_point(Vec2::new(5.0, 5.0)).is_none());
    /// ```
    pub fn between(a: &ConvexPolygon, b: &ConvexPolygon) -> Option<Self> {
        let this = a.vertices();
        let other = b.vertices();
        let (n, m) = (this.len(), other.len());
        if n == 0 || m == 0 {
            return None;
        }

        let reference = this[0];
        let edge_right = this[n - 1].normal();
        let edge_left = reference.normal();

        // the corner of b that fits into the wedge at a's first corner
        let mut start = None;
        for i in 0..m {
            let right = other[(i + m - 1) % m].normal();
            let left = other[i].normal();
            if edge_left.cross(right.vec()) > 0.0 && edge_right.cross(left.vec()) < 0.0 {
                start = Some(i);
            }
        }
        let start = start?;

        let mut delta = b.center_of_mass() + reference.position() - other[start].position();
        let mut outline = Vec::with_capacity(n + m);
        let mut reference_points = Vec::with_capacity(n + m);
        outline.push(delta);
        reference_points.push(reference.position());

        let (mut this_index, mut other_index) = (0, start);
        let mut this_cur: Vertex2 = reference;
        let mut other_cur: Vertex2 = other[start];

        for _ in 1..n + m {
            let step = if other_cur.normal().cross(this_cur.normal().vec()) > 0.0 {
                this_index = (this_index + 1) % n;
                let next = this[this_index];
                let d = next.position() - this_cur.position();
                this_cur = next;
                d
            } else {
                other_index = (other_index + 1) % m;
                let next = other[other_index];
                let d = other_cur.position() - next.position();
                other_cur = next;
                d
            };
            delta += step;
            outline.push(delta);
            reference_points.push(this_cur.position());
        }

        Some(CollisionOutline {
            outline,
            reference_points,
        })
    }

    /// Traced centroid positions
    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    /// Corner of `a` each outline point was traced from
    pub fn reference_points(&self) -> &[Vec2] {
        &self.reference_points
    }

    /// Approximate contact point for `b`'s centroid at `query`
    ///
    /// Reference points are averaged with inverse squared distance weights.
    /// Returns `None` if `query` lies outside the outline.
    pub fn collision_point(&self, query: Vec2) -> Option<Vec2> {
        if !contains_point(&self.outline, query) {
            return None;
        }

        let mut total_weight = 0.0;
        let mut weighted = Vec2::ZERO;
        for (point, reference) in self.outline.iter().zip(&self.reference_points) {
            let distance = (query - *point).length_squared();
            if distance == 0.0 {
                return Some(*reference);
            }
            let weight = 1.0 / distance;
            weighted += *reference * weight;
            total_weight += weight;
        }
        Some(weighted / total_weight)
    }
}
