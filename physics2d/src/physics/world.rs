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
//! The simulation world
//!
//! A [`World`] owns its bodies in insertion order, the constraints between
//! them, the drag interaction and the integrator. Everything is driven by
//! [`World::tick`], which runs the stages of [`stages::ORDER`] once:
//!
//! 1. integrate every body with the forces accumulated during the previous
//!    tick
//! 2. apply gravity at every centre of mass
//! 3. resolve contacts between overlapping bodies
//! 4. apply pending drag commands and the drag pull, then every constraint
//!
//! Forces accumulated in steps 2 to 4 take effect at the next tick's
//! integration.

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::error::{WorldError, WorldResult};
use crate::integration::{total_energy, validate_timestep, Integrator, SemiImplicitEuler};
use crate::math::Vec2;

use super::body::RigidBody;
use super::constraint::Constraint;
use super::contact::{resolve_contacts, ContactModel};
use super::config::WorldConfig;
use super::drag::{Drag, DragCommand, DragHandle, DragInteraction, DragModel};
use super::handle::BodyId;
use super::part::Part;
use super::scheduler::{stages, StageId};

/// Counters for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Bodies moved by the integrator
    pub bodies_moved: usize,
    /// Body pairs whose bounding boxes overlapped
    pub pairs_tested: usize,
    /// Piece contacts that produced a force
    pub contacts: usize,
    /// Constraints enacted
    pub constraints_enacted: usize,
}

/// A collection of rigid bodies and constraints stepped together
///
/// # Examples
///
/// ```
/// use physics2d::math::{CFrame, Vec2};
/// use physics2d::physics::{library, World};
///
/// let mut world = World::new();
/// let floor = world.add_body(library::create_floor(CFrame::IDENTITY, library::basic_material()));
/// let block = world.add_body(library::create_box(
///     CFrame::from_position(Vec2::new(0.0, 1.0)),
///     0.2,
///     0.2,
///     library::basic_material(),
/// ));
///
/// for _ in 0..100 {
///     world.tick(0.002).unwrap();
/// }
/// assert!(world.body(block).unwrap().velocity().y < 0.0);
/// assert_eq!(world.body(floor).unwrap().velocity(), Vec2::ZERO);
/// ```
pub struct World {
    config: WorldConfig,
    bodies: Vec<RigidBody>,
    index: HashMap<BodyId, usize>,
    constraints: Vec<Box<dyn Constraint>>,
    integrator: Box<dyn Integrator>,
    drag: DragInteraction,
    step_count: u64,
    last_stats: TickStats,
}

impl World {
    /// Create an empty world with the default configuration
    pub fn new() -> Self {
        World {
            config: WorldConfig::default(),
            bodies: Vec::new(),
            index: HashMap::new(),
            constraints: Vec::new(),
            integrator: Box::new(SemiImplicitEuler::new()),
            drag: DragInteraction::new(),
            step_count: 0,
            last_stats: TickStats::default(),
        }
    }

    /// Create an empty world with a validated configuration
    pub fn with_config(config: WorldConfig) -> WorldResult<Self> {
        config.validate()?;
        let mut world = World::new();
        world.config = config;
        Ok(world)
    }

    /// Replace the integrator
    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        debug!("World integrator set to {}", integrator.name());
        self.integrator = integrator;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Gravitational acceleration
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Change gravity
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// Name of the integrator in use
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// Add a body and return its id
    ///
    /// A body whose id is already in the world is added under a fresh id.
    pub fn add_body(&mut self, mut body: RigidBody) -> BodyId {
        if self.index.contains_key(&body.id()) {
            let old = body.id();
            let renewed = body.renew_id();
            warn!("{} is already in the world, adding it as {}", old, renewed);
        }
        let id = body.id();
        debug!("Adding {} with {} parts", body, body.parts().len());
        self.index.insert(id, self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Add several bodies, returning their ids in order
    pub fn add_bodies<I>(&mut self, bodies: I) -> Vec<BodyId>
    where
        I: IntoIterator<Item = RigidBody>,
    {
        bodies.into_iter().map(|b| self.add_body(b)).collect()
    }

    /// Body with the given id
    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.index.get(&id).map(|&i| &self.bodies[i])
    }

    /// Mutable body with the given id
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        match self.index.get(&id) {
            Some(&i) => Some(&mut self.bodies[i]),
            None => None,
        }
    }

    /// All bodies in insertion order
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Remove a body together with every constraint that references it
    pub fn remove_body(&mut self, id: BodyId) -> WorldResult<RigidBody> {
        let i = *self.index.get(&id).ok_or(WorldError::UnknownBody(id))?;
        let body = self.bodies.remove(i);
        self.rebuild_index();

        let before = self.constraints.len();
        self.constraints.retain(|c| {
            let (a, b) = c.bodies();
            a != id && b != id
        });
        if self.drag.active.is_some_and(|d| d.body == id) {
            self.drag.active = None;
        }

        debug!(
            "Removed {} and {} constraints referencing it",
            body,
            before - self.constraints.len()
        );
        Ok(body)
    }

    /// Remove one part of a body
    ///
    /// When the last part goes, the body is removed as well, together with
    /// every constraint referencing it.
    pub fn remove_part(&mut self, id: BodyId, index: usize) -> WorldResult<Part> {
        let body = self.body_mut(id).ok_or(WorldError::UnknownBody(id))?;
        let part = body
            .detach_part(index)
            .ok_or(WorldError::UnknownPart { body: id, index })?;
        if body.is_empty() {
            self.remove_body(id)?;
        }
        Ok(part)
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id(), i))
            .collect();
    }

    /// Register a constraint between two bodies already in the world
    pub fn add_constraint<C>(&mut self, constraint: C) -> WorldResult<()>
    where
        C: Constraint + 'static,
    {
        let (a, b) = constraint.bodies();
        for id in [a, b] {
            if !self.index.contains_key(&id) {
                return Err(WorldError::UnknownBody(id));
            }
        }
        debug!("Adding {} constraint between {} and {}", constraint.name(), a, b);
        self.constraints.push(Box::new(constraint));
        Ok(())
    }

    /// Number of constraints
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// First part, in insertion order, containing the point
    pub fn part_at(&self, point: Vec2) -> Option<(BodyId, usize)> {
        self.bodies
            .iter()
            .find_map(|b| b.part_at(point).map(|i| (b.id(), i)))
    }

    /// Grab the topmost body under `point`
    ///
    /// Bodies added later are drawn on top, so the last body containing the
    /// point wins. Returns the grabbed body, or `None` if nothing is under
    /// the point, in which case any previous grab is kept.
    pub fn grab_block(&mut self, point: Vec2) -> Option<BodyId> {
        let body = self.bodies.iter().rev().find(|b| b.part_at(point).is_some())?;
        debug!("Grabbed {} at {}", body, point);
        self.drag.active = Some(Drag {
            body: body.id(),
            local_attach: body.frame().global_to_local(point),
            target: point,
        });
        Some(body.id())
    }

    /// Move the drag target
    pub fn drag_block(&mut self, point: Vec2) {
        if let Some(drag) = self.drag.active.as_mut() {
            drag.target = point;
        }
    }

    /// Release the grabbed body
    pub fn drop_block(&mut self) {
        if let Some(drag) = self.drag.active.take() {
            debug!("Dropped {}", drag.body);
        }
    }

    /// Current drag, if any
    pub fn dragged(&self) -> Option<Drag> {
        self.drag.active
    }

    /// Sender for drag commands from other threads
    pub fn drag_handle(&self) -> DragHandle {
        self.drag.handle()
    }

    /// Advance the simulation by `dt`
    pub fn tick(&mut self, dt: f64) -> WorldResult<TickStats> {
        validate_timestep(dt)?;

        let mut stats = TickStats::default();
        for stage in stages::ORDER {
            self.run_stage(stage, dt, &mut stats);
        }

        self.step_count += 1;
        self.last_stats = stats;
        trace!("Tick {}: {:?}", self.step_count, stats);
        Ok(stats)
    }

    fn run_stage(&mut self, stage: StageId, dt: f64, stats: &mut TickStats) {
        match stage {
            stages::INTEGRATION => {
                stats.bodies_moved = self.integrator.integrate(&mut self.bodies, dt);
            }
            stages::EXTERNAL_FORCES => self.apply_gravity(),
            stages::CONTACTS => {
                let contacts = resolve_contacts(&mut self.bodies, &ContactModel::from(&self.config));
                stats.pairs_tested = contacts.pairs_tested;
                stats.contacts = contacts.contacts;
            }
            stages::CONSTRAINTS => {
                self.apply_drag();
                stats.constraints_enacted = self.enact_constraints();
            }
            other => warn!("Skipping unknown stage {:?}", other),
        }
    }

    fn apply_gravity(&mut self) {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            body.apply_force_at_center_of_mass(gravity * body.mass());
        }
    }

    fn apply_drag(&mut self) {
        for command in self.drag.pending() {
            match command {
                DragCommand::Grab(point) => {
                    self.grab_block(point);
                }
                DragCommand::Drag(point) => self.drag_block(point),
                DragCommand::Drop => self.drop_block(),
            }
        }

        let Some(drag) = self.drag.active else {
            return;
        };
        match self.index.get(&drag.body) {
            Some(&i) => drag.apply(&mut self.bodies[i], &DragModel::from(&self.config)),
            None => self.drag.active = None,
        }
    }

    fn enact_constraints(&mut self) -> usize {
        let mut enacted = 0;
        for constraint in &self.constraints {
            let (a, b) = constraint.bodies();
            let (Some(&i), Some(&j)) = (self.index.get(&a), self.index.get(&b)) else {
                continue;
            };
            match pair_mut(&mut self.bodies, i, j) {
                Some((body_a, body_b)) => {
                    constraint.enact(body_a, body_b);
                    enacted += 1;
                }
                None => warn!("{} constraint links {} to itself", constraint.name(), a),
            }
        }
        enacted
    }

    /// Kinetic plus gravitational potential energy of all bodies
    pub fn total_energy(&self) -> f64 {
        total_energy(&self.bodies, self.config.gravity)
    }

    /// Number of ticks run so far
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Counters of the most recent tick
    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Two distinct mutable elements of a slice
fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if i == j {
        return None;
    }
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        Some((&mut left[i], &mut right[0]))
    } else {
        let (left, right) = bodies.split_at_mut(i);
        Some((&mut right[0], &mut left[j]))
    }
}
