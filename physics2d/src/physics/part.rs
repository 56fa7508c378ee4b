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
//! Parts: the shaped pieces a rigid body is built from

use crate::geom::{ConvexPolygon, Shape};
use crate::math::{BoundingBox, CFrame, Vec2};

use super::handle::BodyId;
use super::material::PhysicalProperties;

/// A shape with a material, placed relative to its owning body
///
/// Parts are owned by exactly one [`RigidBody`](super::RigidBody). The part
/// only remembers the [`BodyId`] of its owner; every query that needs the
/// body's pose takes the body frame as an argument.
///
/// The convex decomposition of the shape in body coordinates is computed
/// once when the part is created, together with the mass properties.
#[derive(Debug, Clone)]
pub struct Part {
    shape: Shape,
    relative: CFrame,
    material: PhysicalProperties,
    owner: BodyId,
    local_pieces: Vec<ConvexPolygon>,
    mass: f64,
    inertia: f64,
    local_center_of_mass: Vec2,
}

impl Part {
    pub(crate) fn new(
        shape: Shape,
        relative: CFrame,
        material: PhysicalProperties,
        owner: BodyId,
    ) -> Self {
        let local_pieces = shape.transform_to_cframe(&relative).convex_decomposition();
        let mass = shape.area() * material.density();
        let inertia = shape.inertial_area() * material.density();
        let local_center_of_mass = relative.local_to_global(shape.center_of_mass());
        Part {
            shape,
            relative,
            material,
            owner,
            local_pieces,
            mass,
            inertia,
            local_center_of_mass,
        }
    }

    /// Shape in its own coordinates
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Pose of the part in body coordinates
    pub fn relative_cframe(&self) -> CFrame {
        self.relative
    }

    /// Material
    pub fn material(&self) -> &PhysicalProperties {
        &self.material
    }

    /// Body that owns this part
    pub fn owner(&self) -> BodyId {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: BodyId) {
        self.owner = owner;
    }

    /// Area times density
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Rotational inertia about the part's own centroid
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Centroid in body coordinates
    pub fn local_center_of_mass(&self) -> Vec2 {
        self.local_center_of_mass
    }

    /// Convex pieces in body coordinates
    pub fn local_pieces(&self) -> &[ConvexPolygon] {
        &self.local_pieces
    }

    /// Pose of the part in world coordinates
    pub fn global_cframe(&self, body_frame: &CFrame) -> CFrame {
        body_frame.local_to_global_frame(&self.relative)
    }

    /// Shape in world coordinates
    pub fn global_shape(&self, body_frame: &CFrame) -> Shape {
        self.shape.transform_to_cframe(&self.global_cframe(body_frame))
    }

    /// Convex pieces in world coordinates
    pub fn global_pieces(&self, body_frame: &CFrame) -> Vec<ConvexPolygon> {
        self.local_pieces
            .iter()
            .map(|p| p.transform_to_cframe(body_frame))
            .collect()
    }

    /// World-space bounding box, `None` for a null shape
    pub fn bounding_box(&self, body_frame: &CFrame) -> Option<BoundingBox> {
        BoundingBox::merge_all(
            self.local_pieces
                .iter()
                .map(|p| p.transform_to_cframe(body_frame).bounding_box()),
        )
    }

    /// Centroid in world coordinates
    pub fn center_of_mass(&self, body_frame: &CFrame) -> Vec2 {
        body_frame.local_to_global(self.local_center_of_mass)
    }

    /// Whether the world-space point lies inside the part
    pub fn contains_point(&self, body_frame: &CFrame, point: Vec2) -> bool {
        let local = self.global_cframe(body_frame).global_to_local(point);
        self.shape.contains_point(local)
    }
}
