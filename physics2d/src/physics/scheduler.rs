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
//! Tick stages and the fixed-step scheduler
//!
//! One [`World::tick`](super::World::tick) runs its stages in the fixed order
//! of [`stages::ORDER`]. The order is part of the contract: contacts see the
//! poses produced by this tick's integration, and constraints see the forces
//! contacts accumulated.
//!
//! [`FixedStepScheduler`] turns variable frame times into whole ticks of a
//! constant length. Ticks always run sequentially, because each one reads
//! the bodies written by the previous one.

use log::{trace, warn};

use crate::error::WorldResult;
use crate::integration::validate_timestep;

use super::world::World;

/// Stage identifier within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub usize);

impl StageId {
    /// Create a new stage ID
    pub fn new(id: usize) -> Self {
        StageId(id)
    }
}

/// The stages of a tick
pub mod stages {
    use super::StageId;

    /// Advance every body by the accumulated forces
    pub const INTEGRATION: StageId = StageId(0);

    /// Apply gravity at every centre of mass
    pub const EXTERNAL_FORCES: StageId = StageId(1);

    /// Resolve contacts between overlapping bodies
    pub const CONTACTS: StageId = StageId(2);

    /// Apply the drag interaction, then every constraint
    pub const CONSTRAINTS: StageId = StageId(3);

    /// Execution order within one tick
    pub const ORDER: [StageId; 4] = [INTEGRATION, EXTERNAL_FORCES, CONTACTS, CONSTRAINTS];
}

/// Default cap on ticks per [`FixedStepScheduler::advance`] call
pub const DEFAULT_MAX_SUBSTEPS: usize = 16;

/// Fixed-timestep accumulator
///
/// # Examples
///
/// ```
/// use physics2d::physics::{FixedStepScheduler, World};
///
/// let mut world = World::new();
/// let mut scheduler = FixedStepScheduler::new(0.01);
/// assert_eq!(scheduler.advance(&mut world, 0.035).unwrap(), 3);
/// assert_eq!(scheduler.advance(&mut world, 0.01).unwrap(), 1);
/// assert_eq!(world.step_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    timestep: f64,
    max_substeps: usize,
    accumulator: f64,
}

impl FixedStepScheduler {
    /// Create a scheduler ticking every `timestep` seconds
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    pub fn new(timestep: f64) -> Self {
        assert!(
            timestep > 0.0 && timestep.is_finite(),
            "Timestep must be positive and finite"
        );
        FixedStepScheduler {
            timestep,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            accumulator: 0.0,
        }
    }

    /// Scheduler using the timestep of the world's configuration
    pub fn for_world(world: &World) -> Self {
        Self::new(world.config().timestep)
    }

    /// Set the cap on ticks per call
    pub fn with_max_substeps(mut self, max_substeps: usize) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    /// Tick length
    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Cap on ticks per call
    pub fn max_substeps(&self) -> usize {
        self.max_substeps
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.timestep
    }

    /// Run as many whole ticks as `frame_time` covers
    ///
    /// Leftover time carries over to the next call. When more than
    /// `max_substeps` ticks are due, the backlog is dropped so a slow frame
    /// cannot snowball. Returns the number of ticks run.
    pub fn advance(&mut self, world: &mut World, frame_time: f64) -> WorldResult<usize> {
        if frame_time < 0.0 || !frame_time.is_finite() {
            validate_timestep(frame_time)?;
        }
        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < self.max_substeps {
            world.tick(self.timestep)?;
            self.accumulator -= self.timestep;
            steps += 1;
        }

        if self.accumulator >= self.timestep {
            warn!(
                "Dropping {:.4}s of simulation backlog after {} substeps",
                self.accumulator, steps
            );
            self.accumulator %= self.timestep;
        }

        trace!("Advanced {} ticks, alpha {:.3}", steps, self.alpha());
        Ok(steps)
    }

    /// Forget accumulated time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
