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
//! Pairwise contact forces
//!
//! Contacts are resolved with penalty forces rather than impulses. For every
//! pair of overlapping convex pieces of two different bodies:
//!
//! 1. the nearest exit of each piece out of the other is computed; the
//!    shorter one becomes the contact normal and its owner the intruder
//! 2. the contact point is the centroid of the exact piece intersection
//! 3. three forces are summed and applied to the intruder, with the opposite
//!    force on the base body:
//!    - repulsion, linear in penetration depth
//!    - normal damping of the relative velocity, scaled by the combined
//!      stickiness when the bodies separate
//!    - friction damping of the tangential relative velocity, scaled by the
//!      combined friction
//!
//! Every force is scaled by the harmonic point inertia of both bodies at the
//! contact, so the constants act as acceleration gains.
//!
//! With the `parallel` feature the contact forces of all body pairs are
//! computed on the Rayon pool. Computing is pure; forces are applied
//! afterwards in pair order, so both paths produce identical results.

use crate::geom::ConvexPolygon;
use crate::math::{NormalizedVec2, Vec2};

use super::body::RigidBody;
use super::config::{WorldConfig, REPULSION, VELOCITY_STOP};
use super::handle::BodyId;
use super::material::PhysicalProperties;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Gains of the contact model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactModel {
    /// Repulsion per unit penetration depth
    pub repulsion: f64,
    /// Damping of the relative velocity at the contact point
    pub velocity_stop: f64,
}

impl Default for ContactModel {
    fn default() -> Self {
        ContactModel {
            repulsion: REPULSION,
            velocity_stop: VELOCITY_STOP,
        }
    }
}

impl From<&WorldConfig> for ContactModel {
    fn from(config: &WorldConfig) -> Self {
        ContactModel {
            repulsion: config.repulsion,
            velocity_stop: config.velocity_stop,
        }
    }
}

/// One resolved contact between two convex pieces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactForce {
    /// Body pushed out along the contact normal
    pub intruder: BodyId,
    /// Body the intruder is pushed out of
    pub base: BodyId,
    /// Contact point in world coordinates
    pub point: Vec2,
    /// Penetration vector, the shortest move of the intruder's piece out of
    /// the base's piece
    pub depth: Vec2,
    /// Total force on the intruder; the base receives the negation
    pub force: Vec2,
}

/// Counters for one contact pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactStats {
    /// Body pairs whose bounding boxes overlapped
    pub pairs_tested: usize,
    /// Piece contacts that produced a force
    pub contacts: usize,
}

struct PartPieces<'a> {
    material: &'a PhysicalProperties,
    pieces: Vec<ConvexPolygon>,
}

fn world_pieces(body: &RigidBody) -> Vec<PartPieces<'_>> {
    let frame = body.frame();
    body.parts()
        .iter()
        .map(|part| PartPieces {
            material: part.material(),
            pieces: part.global_pieces(&frame),
        })
        .collect()
}

fn harmonic(a: f64, b: f64) -> f64 {
    1.0 / (1.0 / a + 1.0 / b)
}

/// Whether two bodies can touch at all: their boxes overlap and at least one
/// of them is free to move
pub fn may_collide(a: &RigidBody, b: &RigidBody) -> bool {
    if a.is_anchored() && b.is_anchored() {
        return false;
    }
    match (a.bounding_box(), b.bounding_box()) {
        (Some(ba), Some(bb)) => ba.intersects(&bb),
        _ => false,
    }
}

/// Contact forces between two bodies, without applying them
///
/// # Examples
///
/// ```
/// use physics2d::geom::Rectangle;
/// use physics2d::math::{CFrame, Vec2};
/// use physics2d::physics::{body_contacts, ContactModel, PhysicalProperties, RigidBody};
///
/// let make = |x: f64| {
///     let mut body = RigidBody::new(CFrame::from_position(Vec2::new(x, 0.0)));
///     body.add_part(Rectangle::new(1.0, 1.0).into(), CFrame::IDENTITY, PhysicalProperties::new(1.0));
///     body
/// };
/// let contacts = body_contacts(&make(0.0), &make(0.9), &ContactModel::default());
/// assert_eq!(contacts.len(), 1);
/// assert!((contacts[0].depth.length() - 0.1).abs() < 1e-9);
/// ```
pub fn body_contacts(a: &RigidBody, b: &RigidBody, model: &ContactModel) -> Vec<ContactForce> {
    if !may_collide(a, b) {
        return Vec::new();
    }
    pair_contacts(a, &world_pieces(a), b, &world_pieces(b), model)
}

fn pair_contacts(
    a: &RigidBody,
    a_parts: &[PartPieces<'_>],
    b: &RigidBody,
    b_parts: &[PartPieces<'_>],
    model: &ContactModel,
) -> Vec<ContactForce> {
    let mut contacts = Vec::new();
    for pa in a_parts {
        for pb in b_parts {
            let friction = pa.material.friction_with(pb.material);
            let stickiness = pa.material.stickiness_with(pb.material);
            for ca in &pa.pieces {
                for cb in &pb.pieces {
                    if !ca.bounding_box().intersects(&cb.bounding_box()) {
                        continue;
                    }
                    let contact = piece_contact(a, ca, b, cb, friction, stickiness, model);
                    contacts.extend(contact);
                }
            }
        }
    }
    contacts
}

fn piece_contact(
    a: &RigidBody,
    ca: &ConvexPolygon,
    b: &RigidBody,
    cb: &ConvexPolygon,
    friction: f64,
    stickiness: f64,
    model: &ContactModel,
) -> Option<ContactForce> {
    let exit_a = ca.nearest_exit(cb)?;
    let exit_b = cb.nearest_exit(ca)?;
    let point = ca.intersection(cb)?.center_of_mass();

    let (intruder, base, depth) = if exit_a.length_squared() < exit_b.length_squared() {
        (a, b, exit_a)
    } else {
        (b, a, exit_b)
    };
    let normal = depth.try_normalize()?;
    let tangent = normal.rotate90_counterclockwise();

    let normal_inertia = combined_inertia(intruder, base, point, normal);
    let tangent_inertia = combined_inertia(intruder, base, point, tangent);

    let relative_velocity = intruder.speed_of_point(point) - base.speed_of_point(point);

    let mut normal_component = normal.dot(relative_velocity);
    if normal_component > 0.0 {
        normal_component *= stickiness;
    }
    let tangent_component = tangent.dot(relative_velocity) * friction;

    let repulsion = depth * (model.repulsion * normal_inertia);
    let normal_force = normal * (-normal_component * model.velocity_stop * normal_inertia);
    let friction_force = tangent * (-tangent_component * model.velocity_stop * tangent_inertia);

    let force = repulsion + normal_force + friction_force;
    if !force.is_finite() {
        return None;
    }

    Some(ContactForce {
        intruder: intruder.id(),
        base: base.id(),
        point,
        depth,
        force,
    })
}

/// Harmonic combination of both bodies' point inertias at `point`
pub(crate) fn combined_inertia(a: &RigidBody, b: &RigidBody, point: Vec2, direction: NormalizedVec2) -> f64 {
    harmonic(a.point_inertia_at(point, direction), b.point_inertia_at(point, direction))
}

/// Candidate body pairs `(i, j)` with `i < j`, in deterministic order
pub fn candidate_pairs(bodies: &[RigidBody]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..bodies.len() {
        for j in i + 1..bodies.len() {
            if may_collide(&bodies[i], &bodies[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[cfg(feature = "parallel")]
fn compute_pair_contacts(
    bodies: &[RigidBody],
    pairs: &[(usize, usize)],
    model: &ContactModel,
) -> Vec<Vec<ContactForce>> {
    let pieces: Vec<Vec<PartPieces<'_>>> = bodies.par_iter().map(world_pieces).collect();
    pairs
        .par_iter()
        .map(|&(i, j)| pair_contacts(&bodies[i], &pieces[i], &bodies[j], &pieces[j], model))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn compute_pair_contacts(
    bodies: &[RigidBody],
    pairs: &[(usize, usize)],
    model: &ContactModel,
) -> Vec<Vec<ContactForce>> {
    let pieces: Vec<Vec<PartPieces<'_>>> = bodies.iter().map(world_pieces).collect();
    pairs
        .iter()
        .map(|&(i, j)| pair_contacts(&bodies[i], &pieces[i], &bodies[j], &pieces[j], model))
        .collect()
}

/// Compute and apply all contact forces between `bodies`
///
/// Forces are accumulated on the bodies and take effect at the next
/// integration.
pub fn resolve_contacts(bodies: &mut [RigidBody], model: &ContactModel) -> ContactStats {
    let pairs = candidate_pairs(bodies);
    let per_pair = compute_pair_contacts(bodies, &pairs, model);

    let mut stats = ContactStats {
        pairs_tested: pairs.len(),
        contacts: 0,
    };
    for (&(i, j), contacts) in pairs.iter().zip(per_pair) {
        let (left, right) = bodies.split_at_mut(j);
        let (a, b) = (&mut left[i], &mut right[0]);
        for contact in contacts {
            if contact.intruder == a.id() {
                a.action_reaction(b, contact.point, contact.force);
            } else {
                b.action_reaction(a, contact.point, contact.force);
            }
            stats.contacts += 1;
        }
    }
    stats
}
