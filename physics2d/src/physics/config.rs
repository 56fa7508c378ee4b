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
//! World configuration
//!
//! All tuning constants of the contact model and the drag interaction live in
//! [`WorldConfig`]. The defaults are tuned for bodies of roughly 0.1 to 1
//! length units stepped at a few hundred ticks per second.
//!
//! # Contact model
//!
//! Contacts are stiff springs: the repulsion force at a contact point is
//! `depth * REPULSION * I`, where `I` is the harmonic point inertia of the two
//! bodies along the contact normal. Dividing by `I` turns every constant here
//! into an acceleration gain, so the same values work for light and heavy
//! bodies.
//!
//! # Drag
//!
//! The drag pull is `delta * MAGNET_STRENGTH - v * MAGNET_MOVEMENT_CANCEL`
//! per unit mass. With `MAGNET_MOVEMENT_CANCEL = 2 * sqrt(MAGNET_STRENGTH)`
//! the pull is critically damped.

use log::warn;

use crate::error::{WorldError, WorldResult};
use crate::math::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default contact repulsion gain (per unit depth)
pub const REPULSION: f64 = 30000.0;

/// Default contact velocity damping gain
pub const VELOCITY_STOP: f64 = 400.0;

/// Default drag spring gain
pub const MAGNET_STRENGTH: f64 = 40000.0;

/// Default drag velocity damping gain
pub const MAGNET_MOVEMENT_CANCEL: f64 = 400.0;

/// Default drag angular damping gain
pub const MAGNET_ROTATION_CANCEL: f64 = 1.0;

/// Default cap on the drag acceleration
pub const MAGNET_MAX_ACCELERATION: f64 = 1000.0;

/// Default gravity
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -2.0);

/// Default tick length used by the fixed-step scheduler
pub const DEFAULT_TIMESTEP: f64 = 1.0 / 500.0;

/// Tuning parameters of a [`World`](super::World)
///
/// # Example
///
/// ```
/// use physics2d::math::Vec2;
/// use physics2d::physics::WorldConfig;
///
/// let config = WorldConfig::default()
///     .with_gravity(Vec2::new(0.0, -9.81))
///     .with_timestep(1.0 / 1000.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Gravitational acceleration applied at every centre of mass
    pub gravity: Vec2,
    /// Contact repulsion gain
    pub repulsion: f64,
    /// Contact velocity damping gain
    pub velocity_stop: f64,
    /// Drag spring gain
    pub magnet_strength: f64,
    /// Drag velocity damping gain
    pub magnet_movement_cancel: f64,
    /// Drag angular damping gain
    pub magnet_rotation_cancel: f64,
    /// Cap on the drag acceleration
    pub magnet_max_acceleration: f64,
    /// Tick length for [`FixedStepScheduler`](super::FixedStepScheduler)
    pub timestep: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            gravity: DEFAULT_GRAVITY,
            repulsion: REPULSION,
            velocity_stop: VELOCITY_STOP,
            magnet_strength: MAGNET_STRENGTH,
            magnet_movement_cancel: MAGNET_MOVEMENT_CANCEL,
            magnet_rotation_cancel: MAGNET_ROTATION_CANCEL,
            magnet_max_acceleration: MAGNET_MAX_ACCELERATION,
            timestep: DEFAULT_TIMESTEP,
        }
    }
}

impl WorldConfig {
    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the contact repulsion gain
    pub fn with_repulsion(mut self, repulsion: f64) -> Self {
        self.repulsion = repulsion;
        self
    }

    /// Set the contact velocity damping gain
    pub fn with_velocity_stop(mut self, velocity_stop: f64) -> Self {
        self.velocity_stop = velocity_stop;
        self
    }

    /// Set the drag spring gain
    pub fn with_magnet_strength(mut self, strength: f64) -> Self {
        self.magnet_strength = strength;
        self
    }

    /// Set the drag velocity damping gain
    pub fn with_magnet_movement_cancel(mut self, cancel: f64) -> Self {
        self.magnet_movement_cancel = cancel;
        self
    }

    /// Set the drag angular damping gain
    pub fn with_magnet_rotation_cancel(mut self, cancel: f64) -> Self {
        self.magnet_rotation_cancel = cancel;
        self
    }

    /// Set the cap on the drag acceleration
    pub fn with_magnet_max_acceleration(mut self, max: f64) -> Self {
        self.magnet_max_acceleration = max;
        self
    }

    /// Set the scheduler tick length
    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    /// Check every value
    ///
    /// Gains must be finite and non-negative, gravity finite and the timestep
    /// positive and finite.
    pub fn validate(&self) -> WorldResult<()> {
        if !self.gravity.is_finite() {
            return Err(invalid(format!("gravity {} is not finite", self.gravity)));
        }

        let gains = [
            ("repulsion", self.repulsion),
            ("velocity_stop", self.velocity_stop),
            ("magnet_strength", self.magnet_strength),
            ("magnet_movement_cancel", self.magnet_movement_cancel),
            ("magnet_rotation_cancel", self.magnet_rotation_cancel),
            ("magnet_max_acceleration", self.magnet_max_acceleration),
        ];
        for (name, value) in gains {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }

        if !(self.timestep > 0.0 && self.timestep.is_finite()) {
            return Err(invalid(format!(
                "timestep must be positive and finite, got {}",
                self.timestep
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> WorldError {
    warn!("Rejected world configuration: {}", message);
    WorldError::InvalidConfig(message)
}
