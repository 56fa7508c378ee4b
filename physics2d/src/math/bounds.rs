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
//! Axis-aligned bounding boxes and scalar intervals

use super::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with `xmin <= xmax` and `ymin <= ymax`
///
/// # Examples
///
/// ```
/// use physics2d::math::{BoundingBox, Vec2};
///
/// let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
/// let b = BoundingBox::new(0.5, 0.5, 2.0, 2.0);
/// assert!(a.intersects(&b));
/// assert_eq!(a.merge(&b), BoundingBox::new(0.0, 0.0, 2.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Minimum x
    pub xmin: f64,
    /// Minimum y
    pub ymin: f64,
    /// Maximum x
    pub xmax: f64,
    /// Maximum y
    pub ymax: f64,
}

impl BoundingBox {
    /// Create a box from its extremes
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        debug_assert!(xmin <= xmax && ymin <= ymax, "BoundingBox extremes out of order");
        BoundingBox { xmin, ymin, xmax, ymax }
    }

    /// Smallest box containing every point, `None` for an empty set
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = BoundingBox {
            xmin: first.x,
            ymin: first.y,
            xmax: first.x,
            ymax: first.y,
        };
        for p in iter {
            b.xmin = b.xmin.min(p.x);
            b.ymin = b.ymin.min(p.y);
            b.xmax = b.xmax.max(p.x);
            b.ymax = b.ymax.max(p.y);
        }
        Some(b)
    }

    /// Smallest box containing both boxes
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    /// Merge a sequence of boxes, `None` if the sequence is empty
    pub fn merge_all<I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = BoundingBox>,
    {
        boxes.into_iter().reduce(|a, b| a.merge(&b))
    }

    /// Check whether the interiors of two boxes overlap
    ///
    /// Boxes that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.xmin < other.xmax
            && self.xmax > other.xmin
            && self.ymin < other.ymax
            && self.ymax > other.ymin
    }

    /// Check whether a point lies inside or on the boundary
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }
}

/// Closed scalar interval `[min, max]`, used for projections onto SAT axes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Range {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Range {
    /// Create an interval
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max, "Range requires min <= max, got [{}, {}]", min, max);
        Range { min, max }
    }

    /// Smallest interval containing every value, `None` for an empty set
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Range { min: first, max: first }, |r, v| Range {
            min: r.min.min(v),
            max: r.max.max(v),
        }))
    }

    /// Check whether two intervals have no point in common
    pub fn is_disjunct(&self, other: &Range) -> bool {
        other.max < self.min || other.min > self.max
    }

    /// Overlap of two intervals, `None` if they are disjunct
    pub fn intersect(&self, other: &Range) -> Option<Range> {
        if self.is_disjunct(other) {
            None
        } else {
            Some(Range {
                min: self.min.max(other.min),
                max: self.max.min(other.max),
            })
        }
    }

    /// Check whether a value lies inside the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Midpoint
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Length of the interval
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}
