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
//! Rigid coordinate frames
//!
//! A [`CFrame`] is a position plus a rotation. It is used both as a body's pose
//! in the world and as a part's pose relative to its body.
//!
//! `local_to_global` maps a point expressed in the frame into the parent space:
//! `R * p + position`. `global_to_local` is its exact inverse, so for every
//! frame `F` and point `p`:
//!
//! ```
//! use physics2d::math::{CFrame, Vec2};
//!
//! let frame = CFrame::new(Vec2::new(1.0, -2.0), 0.8);
//! let p = Vec2::new(0.3, 0.4);
//! let back = frame.global_to_local(frame.local_to_global(p));
//! assert!((back - p).length() < 1e-12);
//! ```

use std::fmt;

use super::mat2::RotMat2;
use super::vec2::Vec2;
use super::vertex::Vertex2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and rotation of a rigid frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CFrame {
    position: Vec2,
    rotation: RotMat2,
}

impl CFrame {
    /// The frame at the origin with no rotation
    pub const IDENTITY: CFrame = CFrame {
        position: Vec2::ZERO,
        rotation: RotMat2::IDENTITY,
    };

    /// Create a frame at `position` rotated by `angle` radians
    pub fn new(position: Vec2, angle: f64) -> Self {
        CFrame {
            position,
            rotation: RotMat2::from_angle(angle),
        }
    }

    /// Create a frame from a position and rotation matrix
    pub fn from_parts(position: Vec2, rotation: RotMat2) -> Self {
        CFrame { position, rotation }
    }

    /// Create an unrotated frame at `position`
    pub fn from_position(position: Vec2) -> Self {
        CFrame {
            position,
            rotation: RotMat2::IDENTITY,
        }
    }

    /// Get the frame origin
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Get the frame rotation
    pub fn rotation(&self) -> RotMat2 {
        self.rotation
    }

    /// Get the rotation angle in radians
    pub fn angle(&self) -> f64 {
        self.rotation.angle()
    }

    /// Map a point from this frame into the parent space
    pub fn local_to_global(&self, point: Vec2) -> Vec2 {
        self.rotation * point + self.position
    }

    /// Map a point from the parent space into this frame
    pub fn global_to_local(&self, point: Vec2) -> Vec2 {
        self.rotation.inv() * (point - self.position)
    }

    /// Rotate a free vector (direction or offset) into the parent space
    pub fn local_to_global_vec(&self, v: Vec2) -> Vec2 {
        self.rotation * v
    }

    /// Rotate a free vector from the parent space into this frame
    pub fn global_to_local_vec(&self, v: Vec2) -> Vec2 {
        self.rotation.inv() * v
    }

    /// Map a vertex into the parent space, rotating its directions with it
    pub fn local_to_global_vertex(&self, vertex: &Vertex2) -> Vertex2 {
        vertex.transformed(self.position, self.rotation)
    }

    /// Map a vertex from the parent space into this frame
    pub fn global_to_local_vertex(&self, vertex: &Vertex2) -> Vertex2 {
        let inv = self.inverse();
        vertex.transformed(inv.position, inv.rotation)
    }

    /// Compose frames: express a frame given relative to `self` in the parent space
    pub fn local_to_global_frame(&self, frame: &CFrame) -> CFrame {
        CFrame {
            position: self.local_to_global(frame.position),
            rotation: self.rotation * frame.rotation,
        }
    }

    /// Express a frame given in the parent space relative to `self`
    pub fn global_to_local_frame(&self, frame: &CFrame) -> CFrame {
        CFrame {
            position: self.global_to_local(frame.position),
            rotation: self.rotation.inv() * frame.rotation,
        }
    }

    /// The frame that undoes this one
    pub fn inverse(&self) -> CFrame {
        let inv = self.rotation.inv();
        CFrame {
            position: -(inv * self.position),
            rotation: inv,
        }
    }

    /// Return this frame moved by `offset`
    pub fn translated(&self, offset: Vec2) -> CFrame {
        CFrame {
            position: self.position + offset,
            rotation: self.rotation,
        }
    }

    /// Return this frame with its orientation turned by `rotation` about its own origin
    pub fn rotated(&self, rotation: RotMat2) -> CFrame {
        CFrame {
            position: self.position,
            rotation: self.rotation * rotation,
        }
    }

    /// Check that the frame contains no NaN or infinite values
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.rotation.angle().is_finite()
    }
}

impl fmt::Display for CFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CFrame({}, {:.6} rad)", self.position, self.angle())
    }
}
