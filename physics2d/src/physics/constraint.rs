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
//! Constraints between pairs of bodies
//!
//! Constraints hold no state between ticks. Each tick every constraint reads
//! the current frames and velocities of its two bodies and accumulates
//! corrective forces or torques on them. They are evaluated once, in
//! registration order, and never iterated to convergence, so chains of
//! constraints settle over several ticks.

use std::fmt;

use crate::math::{CFrame, Vec2};

use super::body::RigidBody;
use super::contact::combined_inertia;
use super::handle::BodyId;

/// Default stiffness of [`PinConstraint`], per unit of point inertia
pub const PIN_STRENGTH: f64 = 3000.0;

/// Default velocity damping of [`PinConstraint`], per unit of point inertia
pub const PIN_DAMPING: f64 = 30.0;

/// A rule acting on two bodies once per tick
pub trait Constraint: Send + Sync + fmt::Debug {
    /// Name used in logs
    fn name(&self) -> &str;

    /// The two bodies, in the order `enact` expects them
    fn bodies(&self) -> (BodyId, BodyId);

    /// Accumulate the corrective forces on both bodies
    fn enact(&self, a: &mut RigidBody, b: &mut RigidBody);
}

/// Two bodies and an attachment frame on each, in body coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// First body
    pub a: BodyId,
    /// Second body
    pub b: BodyId,
    /// Attachment on the first body
    pub attach_a: CFrame,
    /// Attachment on the second body
    pub attach_b: CFrame,
}

impl Link {
    /// Link `a` and `b` at the given attachment frames
    pub fn new(a: BodyId, b: BodyId, attach_a: CFrame, attach_b: CFrame) -> Self {
        Link {
            a,
            b,
            attach_a,
            attach_b,
        }
    }

    /// Link two bodies at the given attachment frames
    pub fn between(a: &RigidBody, b: &RigidBody, attach_a: CFrame, attach_b: CFrame) -> Self {
        Link::new(a.id(), b.id(), attach_a, attach_b)
    }

    /// Attachment frame of the first body in world coordinates
    pub fn global_attach_a(&self, a: &RigidBody) -> CFrame {
        a.frame().local_to_global_frame(&self.attach_a)
    }

    /// Attachment frame of the second body in world coordinates
    pub fn global_attach_b(&self, b: &RigidBody) -> CFrame {
        b.frame().local_to_global_frame(&self.attach_b)
    }

    /// Rotation of the second attachment relative to the first, in radians
    pub fn relative_angle(&self, a: &RigidBody, b: &RigidBody) -> f64 {
        let rot_a = self.global_attach_a(a).rotation();
        let rot_b = self.global_attach_b(b).rotation();
        (rot_b * rot_a.inv()).angle()
    }
}

/// Pulls the attachment points together with a damped spring
///
/// Each force is scaled by the combined point inertia of both bodies at the
/// attachment, along the force. The attachment points then close the gap
/// like a unit-mass oscillator with the given stiffness and damping, however
/// far they sit from the centres of mass.
///
/// Anchored bodies count as infinitely heavy, so a pin between two anchored
/// bodies does nothing.
#[derive(Debug, Clone)]
pub struct PinConstraint {
    link: Link,
    strength: f64,
    damping: f64,
}

impl PinConstraint {
    /// Pin with the default stiffness and damping
    pub fn new(link: Link) -> Self {
        PinConstraint {
            link,
            strength: PIN_STRENGTH,
            damping: PIN_DAMPING,
        }
    }

    /// Set the stiffness
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Set the velocity damping
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// The linked bodies and attachments
    pub fn link(&self) -> &Link {
        &self.link
    }

    fn pull(&self, a: &mut RigidBody, b: &mut RigidBody) {
        let attach = a.frame().local_to_global(self.link.attach_a.position());
        let target = b.frame().local_to_global(self.link.attach_b.position());
        let delta = target - attach;
        let delta_speed = a.speed_of_point(attach) - b.speed_of_point(attach);

        if let Some(dir) = delta.try_normalize() {
            let inertia = combined_inertia(a, b, attach, dir);
            pull_with(a, b, attach, delta * (inertia * self.strength));
        }
        if let Some(dir) = delta_speed.try_normalize() {
            let inertia = combined_inertia(a, b, attach, dir);
            pull_with(a, b, attach, delta_speed * (-self.damping * inertia));
        }
    }
}

fn pull_with(a: &mut RigidBody, b: &mut RigidBody, point: Vec2, force: Vec2) {
    if force.is_finite() {
        a.action_reaction(b, point, force);
    }
}

impl Constraint for PinConstraint {
    fn name(&self) -> &str {
        "Pin"
    }

    fn bodies(&self) -> (BodyId, BodyId) {
        (self.link.a, self.link.b)
    }

    fn enact(&self, a: &mut RigidBody, b: &mut RigidBody) {
        self.pull(a, b);
    }
}

/// An undamped linear spring between the attachment points
///
/// Rotation is free unless a torsion stiffness is set.
#[derive(Debug, Clone)]
pub struct SpringPinConstraint {
    link: Link,
    strength: f64,
    torsion: f64,
}

impl SpringPinConstraint {
    /// Spring of the given stiffness, force per unit distance
    pub fn new(link: Link, strength: f64) -> Self {
        SpringPinConstraint {
            link,
            strength,
            torsion: 0.0,
        }
    }

    /// Add a torsional spring on the relative rotation of the attachments
    pub fn with_torsion(mut self, torsion: f64) -> Self {
        self.torsion = torsion;
        self
    }
}

impl Constraint for SpringPinConstraint {
    fn name(&self) -> &str {
        "SpringPin"
    }

    fn bodies(&self) -> (BodyId, BodyId) {
        (self.link.a, self.link.b)
    }

    fn enact(&self, a: &mut RigidBody, b: &mut RigidBody) {
        if self.torsion != 0.0 {
            let angle = self.link.relative_angle(a, b);
            a.action_rotaction(b, angle * self.torsion);
        }
        let first = self.link.global_attach_a(a).position();
        let second = self.link.global_attach_b(b).position();
        a.action_reaction(b, first, (second - first) * self.strength);
    }
}

/// A [`PinConstraint`] with a torsional spring on the relative rotation of
/// the attachment frames
#[derive(Debug, Clone)]
pub struct CoilPinConstraint {
    pin: PinConstraint,
    strength: f64,
}

impl CoilPinConstraint {
    /// Coil with the given torsion stiffness, torque per radian
    pub fn new(link: Link, strength: f64) -> Self {
        CoilPinConstraint {
            pin: PinConstraint::new(link),
            strength,
        }
    }

    /// Torsion stiffness
    pub fn strength(&self) -> f64 {
        self.strength
    }
}

impl Constraint for CoilPinConstraint {
    fn name(&self) -> &str {
        "CoilPin"
    }

    fn bodies(&self) -> (BodyId, BodyId) {
        self.pin.bodies()
    }

    fn enact(&self, a: &mut RigidBody, b: &mut RigidBody) {
        let angle = self.pin.link.relative_angle(a, b);
        a.action_rotaction(b, angle * self.strength);
        self.pin.pull(a, b);
    }
}

/// Matches the angular velocity and angular acceleration of two bodies
///
/// Each tick the velocity difference is removed with an equal and opposite
/// torque impulse, and the accumulated angular accelerations are equalised
/// with an equal and opposite torque. Both are scaled by the harmonic
/// combination of the two rotational inertias.
#[derive(Debug, Clone)]
pub struct SlideConstraint {
    link: Link,
}

impl SlideConstraint {
    /// Slide between the linked bodies
    pub fn new(link: Link) -> Self {
        SlideConstraint { link }
    }
}

fn rotational_inertia(body: &RigidBody) -> f64 {
    if body.is_anchored() {
        f64::INFINITY
    } else {
        body.inertia()
    }
}

impl Constraint for SlideConstraint {
    fn name(&self) -> &str {
        "Slide"
    }

    fn bodies(&self) -> (BodyId, BodyId) {
        (self.link.a, self.link.b)
    }

    fn enact(&self, a: &mut RigidBody, b: &mut RigidBody) {
        let combined = 1.0 / rotational_inertia(a) + 1.0 / rotational_inertia(b);
        if !(combined > 0.0 && combined.is_finite()) {
            return;
        }
        let inertia = 1.0 / combined;

        let delta_omega = b.angular_velocity() - a.angular_velocity();
        a.apply_torque_impulse(delta_omega * inertia);
        b.apply_torque_impulse(-delta_omega * inertia);

        let delta_alpha = b.angular_acceleration() - a.angular_acceleration();
        a.apply_torque(delta_alpha * inertia);
        b.apply_torque(-delta_alpha * inertia);
    }
}

/// Displacement from the first attachment point to the second
pub fn attachment_gap(link: &Link, a: &RigidBody, b: &RigidBody) -> Vec2 {
    link.global_attach_b(b).position() - link.global_attach_a(a).position()
}
