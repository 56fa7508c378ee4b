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
//! Input validation for polygon outlines

use crate::error::{GeometryError, GeometryResult};
use crate::math::Vec2;

use super::polygon::{segments_intersect, signed_area};

/// Check that `corners` describe a simple counter-clockwise polygon
///
/// Checks run in order and the first failure is returned:
///
/// 1. at least three corners
/// 2. every coordinate finite
/// 3. positive signed area
/// 4. no two non-adjacent edges touch
///
/// # Examples
///
/// ```
/// use physics2d::error::GeometryError;
/// use physics2d::geom::validate_polygon;
/// use physics2d::math::Vec2;
///
/// let clockwise = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)];
/// assert!(matches!(
///     validate_polygon(&clockwise),
///     Err(GeometryError::ClockwiseWinding { .. })
/// ));
/// ```
pub fn validate_polygon(corners: &[Vec2]) -> GeometryResult<()> {
    let n = corners.len();
    if n < 3 {
        return Err(GeometryError::TooFewVertices { count: n });
    }

    if let Some(vertex) = corners.iter().position(|c| !c.is_finite()) {
        return Err(GeometryError::NonFiniteVertex { vertex });
    }

    let area = signed_area(corners);
    if area <= 0.0 {
        return Err(GeometryError::ClockwiseWinding { signed_area: area });
    }

    for i in 0..n {
        for j in i + 2..n {
            // the last edge is adjacent to the first
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments_intersect(corners[i], corners[(i + 1) % n], corners[j], corners[(j + 1) % n]) {
                return Err(GeometryError::SelfIntersecting {
                    first_edge: i,
                    second_edge: j,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_square() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(validate_polygon(&square), Ok(()));
    }

    #[test]
    fn test_too_few() {
        assert_eq!(
            validate_polygon(&[Vec2::ZERO, Vec2::new(1.0, 0.0)]),
            Err(GeometryError::TooFewVertices { count: 2 })
        );
    }

    #[test]
    fn test_non_finite() {
        let bad = [Vec2::ZERO, Vec2::new(f64::NAN, 0.0), Vec2::new(0.0, 1.0)];
        assert_eq!(
            validate_polygon(&bad),
            Err(GeometryError::NonFiniteVertex { vertex: 1 })
        );
    }

    #[test]
    fn test_self_intersecting() {
        // a figure eight whose total signed area is still positive
        let eight = [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(1.0, 3.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(0.0, -1.0),
        ];
        assert!(signed_area(&eight) > 0.0);
        assert!(matches!(
            validate_polygon(&eight),
            Err(GeometryError::SelfIntersecting { .. })
        ));
    }
}
