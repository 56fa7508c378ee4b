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
//! Mouse-style drag interaction
//!
//! A drag pulls one point of one body toward a target with a critically
//! damped spring whose acceleration is capped. Input usually arrives on a
//! different thread than the one ticking the world, so the gesture is sent
//! as [`DragCommand`] messages through a [`DragHandle`]. The world drains the
//! channel once per tick, right before the drag force is applied, so the
//! outcome of a tick never depends on when input arrived within it.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::math::Vec2;

use super::body::RigidBody;
use super::config::WorldConfig;
use super::handle::BodyId;

/// One step of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragCommand {
    /// Grab the topmost body under the point
    Grab(Vec2),
    /// Move the target
    Drag(Vec2),
    /// Release
    Drop,
}

/// Cloneable sender for drag commands, usable from any thread
///
/// # Examples
///
/// ```
/// use physics2d::math::Vec2;
/// use physics2d::physics::World;
///
/// let world = World::new();
/// let handle = world.drag_handle();
/// std::thread::spawn(move || {
///     handle.grab(Vec2::new(0.0, 1.0));
///     handle.drag(Vec2::new(0.5, 1.0));
///     handle.drop();
/// })
/// .join()
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DragHandle {
    sender: Sender<DragCommand>,
}

impl DragHandle {
    /// Send a command; returns false once the world is gone
    pub fn send(&self, command: DragCommand) -> bool {
        self.sender.send(command).is_ok()
    }

    /// Grab the topmost body under `point`
    pub fn grab(&self, point: Vec2) -> bool {
        self.send(DragCommand::Grab(point))
    }

    /// Move the drag target to `point`
    pub fn drag(&self, point: Vec2) -> bool {
        self.send(DragCommand::Drag(point))
    }

    /// Release the grabbed body
    pub fn drop(&self) -> bool {
        self.send(DragCommand::Drop)
    }
}

/// An active drag: which body, where it was grabbed and where it is pulled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Dragged body
    pub body: BodyId,
    /// Grab point in body coordinates
    pub local_attach: Vec2,
    /// Target point in world coordinates
    pub target: Vec2,
}

/// Gains of the drag pull
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragModel {
    /// Spring gain per unit distance and mass
    pub strength: f64,
    /// Damping of the grab point velocity
    pub movement_cancel: f64,
    /// Damping of the angular velocity
    pub rotation_cancel: f64,
    /// Cap on the pull acceleration
    pub max_acceleration: f64,
}

impl From<&WorldConfig> for DragModel {
    fn from(config: &WorldConfig) -> Self {
        DragModel {
            strength: config.magnet_strength,
            movement_cancel: config.magnet_movement_cancel,
            rotation_cancel: config.magnet_rotation_cancel,
            max_acceleration: config.magnet_max_acceleration,
        }
    }
}

impl Default for DragModel {
    fn default() -> Self {
        DragModel::from(&WorldConfig::default())
    }
}

impl Drag {
    /// Grab point in world coordinates
    pub fn attach_point(&self, body: &RigidBody) -> Vec2 {
        body.frame().local_to_global(self.local_attach)
    }

    /// Acceleration the pull asks of the grab point, before multiplying by
    /// mass
    pub fn pull_acceleration(&self, body: &RigidBody, model: &DragModel) -> Vec2 {
        let attach = self.attach_point(body);
        let delta = self.target - attach;
        let pull = delta * model.strength - body.speed_of_point(attach) * model.movement_cancel;
        pull.max_length(model.max_acceleration)
    }

    /// Accumulate the pull force at the grab point and the rotational damping
    pub fn apply(&self, body: &mut RigidBody, model: &DragModel) {
        let attach = self.attach_point(body);
        let acceleration = self.pull_acceleration(body, model);
        body.apply_force(acceleration * body.mass(), attach);
        body.apply_torque(-body.angular_velocity() * model.rotation_cancel * body.inertia());
    }
}

/// Channel endpoints plus the current drag
#[derive(Debug)]
pub(crate) struct DragInteraction {
    sender: Sender<DragCommand>,
    receiver: Receiver<DragCommand>,
    pub(crate) active: Option<Drag>,
}

impl DragInteraction {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        DragInteraction {
            sender,
            receiver,
            active: None,
        }
    }

    pub(crate) fn handle(&self) -> DragHandle {
        DragHandle {
            sender: self.sender.clone(),
        }
    }

    /// Commands received since the last drain, in send order
    pub(crate) fn pending(&self) -> Vec<DragCommand> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rectangle;
    use crate::math::CFrame;
    use crate::physics::PhysicalProperties;

    fn unit_box() -> RigidBody {
        let mut body = RigidBody::new(CFrame::IDENTITY);
        body.add_part(Rectangle::new(1.0, 1.0).into(), CFrame::IDENTITY, PhysicalProperties::new(2.0));
        body
    }

    #[test]
    fn test_pull_toward_target() {
        let mut body = unit_box();
        let drag = Drag {
            body: body.id(),
            local_attach: Vec2::ZERO,
            target: Vec2::new(0.01, 0.0),
        };
        let model = DragModel::default();
        drag.apply(&mut body, &model);
        // 0.01 * 40000 = 400, under the cap
        assert!((body.total_force() - Vec2::new(800.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_pull_is_capped() {
        let body = unit_box();
        let drag = Drag {
            body: body.id(),
            local_attach: Vec2::new(0.2, 0.2),
            target: Vec2::new(10.0, 10.0),
        };
        let model = DragModel::default();
        let a = drag.pull_acceleration(&body, &model);
        assert!((a.length() - model.max_acceleration).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_is_damped() {
        let mut body = unit_box();
        body.set_angular_velocity(3.0);
        let drag = Drag {
            body: body.id(),
            local_attach: Vec2::ZERO,
            target: Vec2::ZERO,
        };
        drag.apply(&mut body, &DragModel::default());
        assert!((body.total_moment() + 3.0 * body.inertia()).abs() < 1e-9);
    }

    #[test]
    fn test_commands_arrive_in_order() {
        let interaction = DragInteraction::new();
        let handle = interaction.handle();
        let other = handle.clone();
        assert!(handle.grab(Vec2::new(1.0, 2.0)));
        assert!(other.drag(Vec2::new(3.0, 4.0)));
        assert!(handle.drop());
        assert_eq!(
            interaction.pending(),
            vec![
                DragCommand::Grab(Vec2::new(1.0, 2.0)),
                DragCommand::Drag(Vec2::new(3.0, 4.0)),
                DragCommand::Drop,
            ]
        );
        assert!(interaction.pending().is_empty());
    }
}
