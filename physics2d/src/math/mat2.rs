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
//! 2x2 matrices and rotations
//!
//! [`Mat2`] is a general row-major matrix `[a b; c d]`. [`RotMat2`] stores only
//! the cosine and sine of an angle, so it is orthonormal by construction; its
//! inverse is the transpose and its determinant is 1.

use std::ops::{Add, Mul, Sub};

use super::vec2::{NormalizedVec2, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// General 2x2 matrix `[a b; c d]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mat2 {
    /// Row 0, column 0
    pub a: f64,
    /// Row 0, column 1
    pub b: f64,
    /// Row 1, column 0
    pub c: f64,
    /// Row 1, column 1
    pub d: f64,
}

impl Mat2 {
    /// The identity matrix
    pub const IDENTITY: Mat2 = Mat2 { a: 1.0, b: 0.0, c: 0.0, d: 1.0 };

    /// The zero matrix
    pub const ZERO: Mat2 = Mat2 { a: 0.0, b: 0.0, c: 0.0, d: 0.0 };

    /// Create a matrix from its entries in row-major order
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Mat2 { a, b, c, d }
    }

    /// Determinant
    pub fn det(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse
    ///
    /// A singular matrix yields non-finite entries.
    pub fn inv(&self) -> Mat2 {
        let det = self.det();
        Mat2::new(self.d / det, -self.b / det, -self.c / det, self.a / det)
    }

    /// Transpose
    pub fn transpose(&self) -> Mat2 {
        Mat2::new(self.a, self.c, self.b, self.d)
    }

    /// Multiply every entry by a scalar
    pub fn scale(&self, f: f64) -> Mat2 {
        Mat2::new(self.a * f, self.b * f, self.c * f, self.d * f)
    }
}

impl Add for Mat2 {
    type Output = Mat2;
    fn add(self, o: Mat2) -> Mat2 {
        Mat2::new(self.a + o.a, self.b + o.b, self.c + o.c, self.d + o.d)
    }
}

impl Sub for Mat2 {
    type Output = Mat2;
    fn sub(self, o: Mat2) -> Mat2 {
        Mat2::new(self.a - o.a, self.b - o.b, self.c - o.c, self.d - o.d)
    }
}

impl Mul for Mat2 {
    type Output = Mat2;
    fn mul(self, o: Mat2) -> Mat2 {
        Mat2::new(
            self.a * o.a + self.b * o.c,
            self.a * o.b + self.b * o.d,
            self.c * o.a + self.d * o.c,
            self.c * o.b + self.d * o.d,
        )
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;
    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.b * v.y, self.c * v.x + self.d * v.y)
    }
}

impl Mul<f64> for Mat2 {
    type Output = Mat2;
    fn mul(self, f: f64) -> Mat2 {
        self.scale(f)
    }
}

/// A pure rotation matrix
///
/// Built only from an angle or a unit direction.
///
/// # Examples
///
/// ```
/// use physics2d::math::{RotMat2, Vec2};
///
/// let quarter = RotMat2::from_angle(std::f64::consts::FRAC_PI_2);
/// let v = quarter * Vec2::new(1.0, 0.0);
/// assert!((v - Vec2::new(0.0, 1.0)).length() < 1e-12);
/// assert_eq!(quarter.det(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotMat2 {
    cos: f64,
    sin: f64,
}

impl RotMat2 {
    /// The zero rotation
    pub const IDENTITY: RotMat2 = RotMat2 { cos: 1.0, sin: 0.0 };

    /// Rotation by `angle` radians counter-clockwise
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        RotMat2 { cos, sin }
    }

    /// Rotation that maps +x onto `axis`
    pub fn from_x_axis(axis: NormalizedVec2) -> Self {
        RotMat2 { cos: axis.x(), sin: axis.y() }
    }

    /// The rotation angle in `(-pi, pi]`
    pub fn angle(&self) -> f64 {
        self.sin.atan2(self.cos)
    }

    /// Image of +x under this rotation
    pub fn orientation(&self) -> NormalizedVec2 {
        NormalizedVec2::new_unchecked(Vec2::new(self.cos, self.sin))
    }

    /// Inverse rotation, which is the transpose
    pub fn inv(&self) -> RotMat2 {
        RotMat2 { cos: self.cos, sin: -self.sin }
    }

    /// Always 1
    pub fn det(&self) -> f64 {
        1.0
    }

    /// The rotation as a general matrix
    pub fn to_mat2(&self) -> Mat2 {
        Mat2::new(self.cos, -self.sin, self.sin, self.cos)
    }

    /// Rotate a unit vector, keeping it normalized
    pub fn rotate_normalized(&self, v: NormalizedVec2) -> NormalizedVec2 {
        NormalizedVec2::new_unchecked(*self * v.vec())
    }
}

impl Default for RotMat2 {
    fn default() -> Self {
        RotMat2::IDENTITY
    }
}

impl Mul<Vec2> for RotMat2 {
    type Output = Vec2;
    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(self.cos * v.x - self.sin * v.y, self.sin * v.x + self.cos * v.y)
    }
}

impl Mul for RotMat2 {
    type Output = RotMat2;
    fn mul(self, o: RotMat2) -> RotMat2 {
        RotMat2 {
            cos: self.cos * o.cos - self.sin * o.sin,
            sin: self.sin * o.cos + self.cos * o.sin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    fn mat_close(a: Mat2, b: Mat2) -> bool {
        (a.a - b.a).abs() < EPS
            && (a.b - b.b).abs() < EPS
            && (a.c - b.c).abs() < EPS
            && (a.d - b.d).abs() < EPS
    }

    #[test]
    fn test_inverse() {
        let m = Mat2::new(2.0, 1.0, 1.0, 3.0);
        assert!(mat_close(m * m.inv(), Mat2::IDENTITY));
        assert_eq!(m.det(), 5.0);
    }

    #[test]
    fn test_rotation_inverse_is_transpose() {
        let r = RotMat2::from_angle(0.7);
        assert!(mat_close(r.inv().to_mat2(), r.to_mat2().transpose()));
        assert!((r.to_mat2().det() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_composition() {
        let r = RotMat2::from_angle(0.3) * RotMat2::from_angle(0.4);
        assert!((r.angle() - 0.7).abs() < EPS);
        let full = RotMat2::from_angle(PI) * RotMat2::from_angle(PI);
        assert!(full.angle().abs() < EPS);
    }

    #[test]
    fn test_from_x_axis() {
        let axis = Vec2::new(1.0, 1.0).normalize();
        let r = RotMat2::from_x_axis(axis);
        assert!((r.angle() - PI / 4.0).abs() < EPS);
        assert!((r * Vec2::new(1.0, 0.0) - axis.vec()).length() < EPS);
    }

    #[test]
    fn test_rotate_normalized() {
        let r = RotMat2::from_angle(PI / 2.0);
        let n = r.rotate_normalized(NormalizedVec2::UNIT_X);
        assert!((n.vec() - Vec2::new(0.0, 1.0)).length() < EPS);
    }
}
