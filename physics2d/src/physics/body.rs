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
//! Rigid bodies
//!
//! A [`RigidBody`] is a frame plus a list of [`Part`]s. Mass, centre of mass
//! and rotational inertia are derived from the parts and recomputed whenever
//! the part list changes. Forces and torques accumulate between ticks and are
//! consumed by an [`Integrator`](crate::integration::Integrator).
//!
//! A body is either free or anchored. Anchored bodies have infinite point
//! inertia, ignore every force, impulse and torque, and are never integrated.

use std::fmt;

use crate::geom::Shape;
use crate::math::{BoundingBox, CFrame, Mat2, NormalizedVec2, RotMat2, Vec2};

use super::handle::BodyId;
use super::material::PhysicalProperties;
use super::part::Part;

/// A rigid body made of one or more parts
///
/// # Examples
///
/// ```
/// use physics2d::geom::Rectangle;
/// use physics2d::math::{CFrame, Vec2};
/// use physics2d::physics::{PhysicalProperties, RigidBody};
///
/// let mut body = RigidBody::new(CFrame::from_position(Vec2::new(0.0, 2.0)));
/// body.add_part(Rectangle::new(1.0, 1.0).into(), CFrame::IDENTITY, PhysicalProperties::new(10.0));
/// assert!((body.mass() - 10.0).abs() < 1e-12);
/// assert!((body.center_of_mass() - Vec2::new(0.0, 2.0)).length() < 1e-12);
/// ```
///
/// Cloning a body yields an independent body with a fresh [`BodyId`]; the
/// copied parts are owned by the new id.
#[derive(Debug)]
pub struct RigidBody {
    id: BodyId,
    name: Option<String>,
    frame: CFrame,
    local_center_of_mass: Vec2,
    velocity: Vec2,
    angular_velocity: f64,
    total_force: Vec2,
    total_moment: f64,
    mass: f64,
    inertia: f64,
    anchored: bool,
    parts: Vec<Part>,
    bounds: Option<BoundingBox>,
}

impl RigidBody {
    /// Create an empty, free body at `frame`
    pub fn new(frame: CFrame) -> Self {
        RigidBody {
            id: BodyId::next(),
            name: None,
            frame,
            local_center_of_mass: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            total_force: Vec2::ZERO,
            total_moment: 0.0,
            mass: 0.0,
            inertia: 0.0,
            anchored: false,
            parts: Vec::new(),
            bounds: None,
        }
    }

    /// Give this body and its parts a fresh id
    pub(crate) fn renew_id(&mut self) -> BodyId {
        self.id = BodyId::next();
        for part in &mut self.parts {
            part.set_owner(self.id);
        }
        self.id
    }

    /// Attach a name used in log output
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Unique id of this body
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Name given with [`named`](Self::named)
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Add a part and recompute the mass properties
    ///
    /// Returns the index of the new part.
    pub fn add_part(&mut self, shape: Shape, relative: CFrame, material: PhysicalProperties) -> usize {
        self.parts.push(Part::new(shape, relative, material, self.id));
        self.recalculate();
        self.parts.len() - 1
    }

    /// Remove the part at `index` and recompute the mass properties
    pub fn detach_part(&mut self, index: usize) -> Option<Part> {
        if index >= self.parts.len() {
            return None;
        }
        let part = self.parts.remove(index);
        self.recalculate();
        Some(part)
    }

    /// Move a part detached from another body onto this one
    pub fn attach_part(&mut self, mut part: Part) -> usize {
        part.set_owner(self.id);
        self.parts.push(part);
        self.recalculate();
        self.parts.len() - 1
    }

    /// Recompute mass, centre of mass, inertia and bounds from the parts
    pub fn recalculate(&mut self) {
        let mass: f64 = self.parts.iter().map(|p| p.mass()).sum();
        self.mass = mass;
        self.local_center_of_mass = if mass > 0.0 {
            self.parts
                .iter()
                .fold(Vec2::ZERO, |acc, p| acc + p.local_center_of_mass() * p.mass())
                / mass
        } else {
            Vec2::ZERO
        };

        let com = self.local_center_of_mass;
        self.inertia = self
            .parts
            .iter()
            .map(|p| p.inertia() + (p.local_center_of_mass() - com).length_squared() * p.mass())
            .sum();

        self.update_bounds();
    }

    fn update_bounds(&mut self) {
        let frame = self.frame;
        self.bounds = BoundingBox::merge_all(self.parts.iter().filter_map(|p| p.bounding_box(&frame)));
    }

    /// Parts in insertion order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Part at `index`
    pub fn part(&self, index: usize) -> Option<&Part> {
        self.parts.get(index)
    }

    /// Whether the body has no parts left
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Pose of the body frame
    pub fn frame(&self) -> CFrame {
        self.frame
    }

    /// Teleport the body
    pub fn set_frame(&mut self, frame: CFrame) {
        self.frame = frame;
        self.update_bounds();
    }

    /// Cached world-space bounds, `None` for a body without geometry
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Total mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Rotational inertia about the centre of mass
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Centre of mass in body coordinates
    pub fn local_center_of_mass(&self) -> Vec2 {
        self.local_center_of_mass
    }

    /// Centre of mass in world coordinates
    pub fn center_of_mass(&self) -> Vec2 {
        self.frame.local_to_global(self.local_center_of_mass)
    }

    /// Linear velocity of the centre of mass
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Set the linear velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Angular velocity, counter-clockwise positive
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Set the angular velocity
    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    /// Force accumulated since the last integration
    pub fn total_force(&self) -> Vec2 {
        self.total_force
    }

    /// Torque accumulated since the last integration
    pub fn total_moment(&self) -> f64 {
        self.total_moment
    }

    /// Make the body immovable
    pub fn anchor(&mut self) {
        self.anchored = true;
    }

    /// Let the body move again
    pub fn unanchor(&mut self) {
        self.anchored = false;
    }

    /// Whether the body is anchored
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Velocity of the material point currently at `point`
    pub fn speed_of_point(&self, point: Vec2) -> Vec2 {
        self.velocity + (point - self.center_of_mass()).cross_scalar(-self.angular_velocity)
    }

    /// Accumulate a force acting at a world-space point
    pub fn apply_force(&mut self, force: Vec2, point: Vec2) {
        if self.anchored {
            return;
        }
        let relative = point - self.center_of_mass();
        self.total_force += force;
        self.total_moment += relative.cross(force);
    }

    /// Accumulate a force acting at the centre of mass
    pub fn apply_force_at_center_of_mass(&mut self, force: Vec2) {
        if self.anchored {
            return;
        }
        self.total_force += force;
    }

    /// Accumulate a pure torque
    pub fn apply_torque(&mut self, torque: f64) {
        if self.anchored {
            return;
        }
        self.total_moment += torque;
    }

    /// Change velocities instantly by an impulse at a world-space point
    pub fn apply_impulse(&mut self, impulse: Vec2, point: Vec2) {
        if self.anchored {
            return;
        }
        let relative = point - self.center_of_mass();
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
        if self.inertia > 0.0 {
            self.angular_velocity += relative.cross(impulse) / self.inertia;
        }
    }

    /// Change the linear velocity instantly
    pub fn apply_impulse_at_center_of_mass(&mut self, impulse: Vec2) {
        if self.anchored || self.mass <= 0.0 {
            return;
        }
        self.velocity += impulse / self.mass;
    }

    /// Change the angular velocity instantly
    pub fn apply_torque_impulse(&mut self, torque_impulse: f64) {
        if self.anchored || self.inertia <= 0.0 {
            return;
        }
        self.angular_velocity += torque_impulse / self.inertia;
    }

    /// Apply `force` to this body and `-force` to `other`, both at `point`
    pub fn action_reaction(&mut self, other: &mut RigidBody, point: Vec2, force: Vec2) {
        self.apply_force(force, point);
        other.apply_force(-force, point);
    }

    /// Apply half of `torque` to this body and the opposite half to `other`
    pub fn action_rotaction(&mut self, other: &mut RigidBody, torque: f64) {
        self.apply_torque(torque / 2.0);
        other.apply_torque(-torque / 2.0);
    }

    /// Linear acceleration produced by the accumulated force
    pub fn acceleration(&self) -> Vec2 {
        if self.mass > 0.0 {
            self.total_force / self.mass
        } else {
            Vec2::ZERO
        }
    }

    /// Angular acceleration produced by the accumulated torque
    pub fn angular_acceleration(&self) -> f64 {
        if self.inertia > 0.0 {
            self.total_moment / self.inertia
        } else {
            0.0
        }
    }

    /// Ratio of force to acceleration for a push along `direction` at
    /// `relative`, an offset from the centre of mass
    ///
    /// Combines the translational and rotational response harmonically:
    /// `1 / (1/m + (r x d)^2 / I)`. Anchored bodies report infinity.
    pub fn point_inertia(&self, relative: Vec2, direction: NormalizedVec2) -> f64 {
        if self.anchored {
            return f64::INFINITY;
        }
        if self.mass <= 0.0 {
            return 0.0;
        }
        let arm = direction.cross(relative);
        1.0 / (1.0 / self.mass + arm * arm / self.inertia)
    }

    /// [`point_inertia`](Self::point_inertia) at a world-space point
    pub fn point_inertia_at(&self, point: Vec2, direction: NormalizedVec2) -> f64 {
        self.point_inertia(point - self.center_of_mass(), direction)
    }

    /// Point inertia with position and direction given in body coordinates
    ///
    /// `direction` does not have to be normalized.
    pub fn local_point_inertia(&self, local_point: Vec2, local_direction: Vec2) -> f64 {
        if self.anchored {
            return f64::INFINITY;
        }
        if self.mass <= 0.0 {
            return 0.0;
        }
        let relative = self.frame.local_to_global_vec(local_point - self.local_center_of_mass);
        let direction = self.frame.local_to_global_vec(local_direction);
        let arm = relative.cross(direction);
        1.0 / (1.0 / self.mass + arm * arm / (self.inertia * direction.length_squared()))
    }

    /// Matrix mapping a force at a world-space point to the acceleration of
    /// that point
    pub fn point_inertial_matrix(&self, point: Vec2) -> Mat2 {
        if self.anchored || self.mass <= 0.0 {
            return Mat2::ZERO;
        }
        let r = point - self.center_of_mass();
        let linear = Mat2::IDENTITY.scale(1.0 / self.mass);
        let rotational = Mat2::new(r.y * r.y, -r.x * r.y, -r.x * r.y, r.x * r.x).scale(1.0 / self.inertia);
        linear + rotational
    }

    /// Acceleration of the material point at `point`: linear, tangential
    /// and centripetal terms
    pub fn acceleration_of_point(&self, point: Vec2) -> Vec2 {
        let r = point - self.center_of_mass();
        let omega = self.angular_velocity;
        self.acceleration() + r.rotate90_counterclockwise() * self.angular_acceleration()
            - r * (omega * omega)
    }

    /// Angular momentum about the centre of mass
    pub fn angular_impulse(&self) -> f64 {
        self.angular_velocity * self.inertia
    }

    /// Translational plus rotational kinetic energy, 0 when anchored
    pub fn kinetic_energy(&self) -> f64 {
        if self.anchored {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.length_squared()
            + 0.5 * self.inertia * self.angular_velocity * self.angular_velocity
    }

    /// Gravitational potential energy relative to the origin, 0 when anchored
    pub fn potential_energy(&self, gravity: Vec2) -> f64 {
        if self.anchored {
            return 0.0;
        }
        -self.mass * self.center_of_mass().dot(gravity)
    }

    /// Kinetic plus potential energy
    pub fn energy(&self, gravity: Vec2) -> f64 {
        self.kinetic_energy() + self.potential_energy(gravity)
    }

    /// Index of the first part containing the world-space point
    pub fn part_at(&self, point: Vec2) -> Option<usize> {
        if !self.bounds.is_some_and(|b| b.contains_point(point)) {
            return None;
        }
        self.parts.iter().position(|p| p.contains_point(&self.frame, point))
    }

    /// Check that pose and velocities are finite
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid() && self.velocity.is_finite() && self.angular_velocity.is_finite()
    }

    /// Move the frame by `movement` and rotate it about the centre of mass
    pub(crate) fn displace(&mut self, movement: Vec2, rotation: RotMat2) {
        let arm = self.frame.local_to_global_vec(self.local_center_of_mass);
        let offset = movement + arm - rotation * arm;
        self.frame = self.frame.translated(offset).rotated(rotation);
    }

    /// Clear the accumulators and refresh the cached bounds after a step
    pub(crate) fn finish_step(&mut self) {
        self.total_force = Vec2::ZERO;
        self.total_moment = 0.0;
        self.update_bounds();
    }
}

impl Clone for RigidBody {
    fn clone(&self) -> Self {
        let mut copy = RigidBody {
            id: self.id,
            name: self.name.clone(),
            frame: self.frame,
            local_center_of_mass: self.local_center_of_mass,
            velocity: self.velocity,
            angular_velocity: self.angular_velocity,
            total_force: self.total_force,
            total_moment: self.total_moment,
            mass: self.mass,
            inertia: self.inertia,
            anchored: self.anchored,
            parts: self.parts.clone(),
            bounds: self.bounds,
        };
        copy.renew_id();
        copy
    }
}

impl fmt::Display for RigidBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} '{}'", self.id, name),
            None => write!(f, "{}", self.id),
        }
    }
}
