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
//! Two-dimensional vectors
//!
//! [`Vec2`] is the plain `(x, y)` value type used for points, offsets, forces
//! and velocities. [`NormalizedVec2`] is a refinement that is guaranteed to have
//! unit length; operations that preserve length (rotations, negation) keep the
//! refinement, everything else decays to a plain [`Vec2`].
//!
//! # Conventions
//!
//! - The 2D cross product `a.cross(b)` is the z component of the 3D cross
//!   product, `a.x * b.y - a.y * b.x`. It is positive when `b` lies
//!   counter-clockwise of `a`.
//! - Angles are in radians and counter-clockwise positive.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a vector has unit length
pub const UNIT_LENGTH_TOLERANCE: f64 = 1e-9;

/// A 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use physics2d::math::Vec2;
///
/// let a = Vec2::new(1.0, 0.0);
/// let b = Vec2::new(0.0, 2.0);
/// assert_eq!(a + b, Vec2::new(1.0, 2.0));
/// assert_eq!(a.cross(b), 2.0);
/// assert_eq!(a.rotate90_counterclockwise(), Vec2::new(0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vec2 {
    /// The zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Create a vector from polar coordinates
    pub fn from_polar(radius: f64, theta: f64) -> Self {
        Vec2::new(radius * theta.cos(), radius * theta.sin())
    }

    /// Dot product
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar 2D cross product, `self.x * other.y - self.y * other.x`
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Cross product of this vector with a vector `z` along the z axis
    ///
    /// Equals `(y * z, -x * z)`. `r.cross_scalar(-omega)` is the velocity of
    /// the point `r` on a body spinning at `omega`.
    pub fn cross_scalar(self, z: f64) -> Vec2 {
        Vec2::new(self.y * z, -self.x * z)
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared Euclidean length
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Distance between two points
    pub fn distance_to(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    /// Angle of this vector measured from the positive x axis
    pub fn theta(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unsigned angle between two vectors, in `[0, pi]`
    pub fn angle_between(self, other: Vec2) -> f64 {
        self.cross(other).atan2(self.dot(other)).abs()
    }

    /// Rotate by -90 degrees: `(y, -x)`
    ///
    /// For an edge of a counter-clockwise polygon this yields the outward normal.
    pub fn rotate90_clockwise(self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }

    /// Rotate by +90 degrees: `(-y, x)`
    pub fn rotate90_counterclockwise(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Normalize to unit length
    ///
    /// The zero vector has no direction; normalizing it yields NaN components.
    /// Use [`Vec2::try_normalize`] when the input may be degenerate.
    pub fn normalize(self) -> NormalizedVec2 {
        let len = self.length();
        NormalizedVec2(Vec2::new(self.x / len, self.y / len))
    }

    /// Normalize to unit length, or `None` for zero or non-finite vectors
    pub fn try_normalize(self) -> Option<NormalizedVec2> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(NormalizedVec2(Vec2::new(self.x / len, self.y / len)))
        } else {
            None
        }
    }

    /// Same direction, given length
    pub fn with_length(self, length: f64) -> Vec2 {
        self * (length / self.length())
    }

    /// Clamp the length to at most `max`
    pub fn max_length(self, max: f64) -> Vec2 {
        if self.length_squared() > max * max {
            self.with_length(max)
        } else {
            self
        }
    }

    /// Extend the length to at least `min`
    pub fn min_length(self, min: f64) -> Vec2 {
        if self.length_squared() < min * min {
            self.with_length(min)
        } else {
            self
        }
    }

    /// Scale this vector so that its projection onto itself equals `w`
    ///
    /// Equals `self * w / |self|`, with the sign of `w` preserved.
    pub fn re_project(self, w: f64) -> Vec2 {
        self * (w / self.length())
    }

    /// Distance from `point` to the infinite line through the origin along `self`
    pub fn point_to_line_distance(self, point: Vec2) -> f64 {
        point.cross(self).abs() / self.length()
    }

    /// Sum of two vectors each weighted by the other's length
    ///
    /// The result bisects the angle between `a` and `b`.
    pub fn bisect(a: Vec2, b: Vec2) -> Vec2 {
        a * b.length() + b * a.length()
    }

    /// Intersection of the lines `origin1 + t * dir1` and `origin2 + s * dir2`
    ///
    /// Solves the 2x2 linear system directly. Parallel directions make the
    /// system singular and the result has NaN or infinite components; callers
    /// must only pass non-parallel directions.
    pub fn intersection(origin1: Vec2, dir1: Vec2, origin2: Vec2, dir2: Vec2) -> Vec2 {
        let a = (origin1 - origin2).cross(dir1) / dir2.cross(dir1);
        origin2 + dir2 * a
    }

    /// Arithmetic mean of a set of points, `None` if the set is empty
    pub fn average(points: &[Vec2]) -> Option<Vec2> {
        if points.is_empty() {
            return None;
        }
        let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
        Some(sum / points.len() as f64)
    }

    /// Check that both components are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// A vector of unit length
///
/// Construction checks the length, so code receiving a `NormalizedVec2` can
/// rely on `length() == 1` without recomputing it.
///
/// # Examples
///
/// ```
/// use physics2d::math::{NormalizedVec2, Vec2};
///
/// let n = NormalizedVec2::new(Vec2::new(0.0, 1.0));
/// assert_eq!(n.length(), 1.0);
/// assert!(NormalizedVec2::try_new(Vec2::new(3.0, 4.0)).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizedVec2(Vec2);

impl NormalizedVec2 {
    /// Unit vector along +x
    pub const UNIT_X: NormalizedVec2 = NormalizedVec2(Vec2::new(1.0, 0.0));
    /// Unit vector along +y
    pub const UNIT_Y: NormalizedVec2 = NormalizedVec2(Vec2::new(0.0, 1.0));

    /// Wrap a vector that already has unit length
    ///
    /// # Panics
    ///
    /// Panics if `v` does not have unit length within [`UNIT_LENGTH_TOLERANCE`]
    pub fn new(v: Vec2) -> Self {
        assert!(
            (v.length_squared() - 1.0).abs() <= UNIT_LENGTH_TOLERANCE,
            "NormalizedVec2 requires unit length, got {}",
            v.length()
        );
        NormalizedVec2(v)
    }

    /// Wrap a vector if it has unit length
    pub fn try_new(v: Vec2) -> Option<Self> {
        if (v.length_squared() - 1.0).abs() <= UNIT_LENGTH_TOLERANCE {
            Some(NormalizedVec2(v))
        } else {
            None
        }
    }

    /// Wrap a vector known to have unit length, such as the image of a unit
    /// vector under a rotation
    pub(crate) fn new_unchecked(v: Vec2) -> Self {
        NormalizedVec2(v)
    }

    /// Unit vector at the given angle from +x
    pub fn from_angle(theta: f64) -> Self {
        NormalizedVec2(Vec2::new(theta.cos(), theta.sin()))
    }

    /// The underlying vector
    pub fn vec(self) -> Vec2 {
        self.0
    }

    /// Horizontal component
    pub fn x(self) -> f64 {
        self.0.x
    }

    /// Vertical component
    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Always 1
    pub fn length(self) -> f64 {
        1.0
    }

    /// Always 1
    pub fn length_squared(self) -> f64 {
        1.0
    }

    /// Dot product with any vector
    pub fn dot(self, other: Vec2) -> f64 {
        self.0.dot(other)
    }

    /// Cross product with any vector
    pub fn cross(self, other: Vec2) -> f64 {
        self.0.cross(other)
    }

    /// Rotate by -90 degrees, staying normalized
    pub fn rotate90_clockwise(self) -> NormalizedVec2 {
        NormalizedVec2(self.0.rotate90_clockwise())
    }

    /// Rotate by +90 degrees, staying normalized
    pub fn rotate90_counterclockwise(self) -> NormalizedVec2 {
        NormalizedVec2(self.0.rotate90_counterclockwise())
    }

    /// Distance from `point` to the line through the origin along this direction
    pub fn point_to_line_distance(self, point: Vec2) -> f64 {
        point.cross(self.0).abs()
    }
}

impl From<NormalizedVec2> for Vec2 {
    fn from(n: NormalizedVec2) -> Vec2 {
        n.0
    }
}

impl Neg for NormalizedVec2 {
    type Output = NormalizedVec2;
    fn neg(self) -> NormalizedVec2 {
        NormalizedVec2(-self.0)
    }
}

impl Mul<f64> for NormalizedVec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        self.0 * rhs
    }
}

impl fmt::Display for NormalizedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_cross_sign() {
        let x = Vec2::new(1.0, 0.0);
        let y = Vec2::new(0.0, 1.0);
        assert_eq!(x.cross(y), 1.0);
        assert_eq!(y.cross(x), -1.0);
    }

    #[test]
    fn test_cross_scalar_is_spin_velocity() {
        // point at +x on a body spinning counter-clockwise moves toward +y
        let r = Vec2::new(2.0, 0.0);
        let v = r.cross_scalar(-3.0);
        assert_eq!(v, Vec2::new(0.0, 6.0));
    }

    #[test]
    fn test_rotations() {
        let v = Vec2::new(3.0, 1.0);
        assert_eq!(v.rotate90_clockwise(), Vec2::new(1.0, -3.0));
        assert_eq!(v.rotate90_counterclockwise(), Vec2::new(-1.0, 3.0));
        assert_eq!(v.rotate90_clockwise().rotate90_counterclockwise(), v);
    }

    #[test]
    fn test_intersection() {
        let p = Vec2::intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 1.0),
        );
        assert!((p - Vec2::new(2.0, 2.0)).length() < EPS);
    }

    #[test]
    fn test_intersection_parallel_is_not_finite() {
        let p = Vec2::intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(2.0, 0.0),
        );
        assert!(!p.is_finite());
    }

    #[test]
    fn test_point_to_line_distance() {
        let dir = Vec2::new(2.0, 0.0);
        assert!((dir.point_to_line_distance(Vec2::new(5.0, -3.0)) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_bisect() {
        let b = Vec2::bisect(Vec2::new(2.0, 0.0), Vec2::new(0.0, 5.0));
        assert!((b.theta() - std::f64::consts::FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn test_length_helpers() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert!((v.max_length(1.0).length() - 1.0).abs() < EPS);
        assert_eq!(v.max_length(10.0), v);
        assert!((v.min_length(10.0).length() - 10.0).abs() < EPS);
        assert!((v.re_project(-2.0) - Vec2::new(-1.2, -1.6)).length() < EPS);
    }

    #[test]
    fn test_try_normalize_zero() {
        assert!(Vec2::ZERO.try_normalize().is_none());
        let n = Vec2::new(0.0, -4.0).try_normalize().unwrap();
        assert_eq!(n.vec(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_normalized_rotation_stays_unit() {
        let n = Vec2::new(1.0, 1.0).normalize();
        let r = n.rotate90_clockwise();
        assert!((r.vec().length() - 1.0).abs() < EPS);
        assert!(n.dot(r.vec()).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "unit length")]
    fn test_normalized_rejects_non_unit() {
        NormalizedVec2::new(Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_average() {
        assert!(Vec2::average(&[]).is_none());
        let avg = Vec2::average(&[Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0)]).unwrap();
        assert_eq!(avg, Vec2::new(1.0, 2.0));
    }
}
