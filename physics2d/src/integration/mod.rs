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
//! Numerical integration of rigid body motion
//!
//! This module provides the [`Integrator`] trait the world steps bodies with,
//! the default [`SemiImplicitEuler`] scheme, timestep validation and energy
//! bookkeeping helpers.
//!
//! # Timestep Guidelines
//!
//! - Too small: Numerical precision issues and wasted computation
//! - Too large: Contacts are stiff springs, so large steps overshoot and
//!   bodies tunnel or explode
//! - Recommended: dt = 1/500 or smaller for the default contact constants

use log::warn;

use crate::error::{WorldError, WorldResult};
use crate::math::Vec2;
use crate::physics::RigidBody;

mod euler;

pub use euler::SemiImplicitEuler;

/// Kinetic energy of a single body
///
/// KE = ½·m·|v|² + ½·I·ω², and 0 for anchored bodies
pub fn kinetic_energy(body: &RigidBody) -> f64 {
    body.kinetic_energy()
}

/// Total kinetic energy of a collection of bodies
pub fn total_kinetic_energy<'a, I>(bodies: I) -> f64
where
    I: IntoIterator<Item = &'a RigidBody>,
{
    bodies.into_iter().map(kinetic_energy).sum()
}

/// Total mechanical energy (kinetic plus gravitational potential)
pub fn total_energy<'a, I>(bodies: I, gravity: Vec2) -> f64
where
    I: IntoIterator<Item = &'a RigidBody>,
{
    bodies.into_iter().map(|b| b.energy(gravity)).sum()
}

/// Validate a timestep for stability
///
/// Non-positive or non-finite timesteps are rejected. Extremely small or
/// large ones are accepted but logged, since they usually indicate a unit
/// mistake in the caller.
pub fn validate_timestep(dt: f64) -> WorldResult<()> {
    if dt <= 0.0 || !dt.is_finite() {
        return Err(WorldError::InvalidTimestep(dt));
    }

    if dt < 1e-9 {
        warn!(
            "Timestep {} is extremely small and may cause precision loss with f64",
            dt
        );
    }

    if dt > 1.0 {
        warn!("Timestep {} is large and may cause instability", dt);
    }

    Ok(())
}

/// Trait for numerical integration methods
///
/// Integrators consume the force and torque accumulated on a body, advance
/// its velocities and pose by one step and clear the accumulators.
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance one body by `dt`
    ///
    /// Anchored and empty bodies keep their pose but still have their
    /// accumulators cleared. Returns whether the body was moved.
    fn integrate_body(&self, body: &mut RigidBody, dt: f64) -> bool;

    /// Advance every body by `dt`
    ///
    /// Returns the number of bodies moved. Bodies whose state became
    /// non-finite are reported through the `log` facade.
    fn integrate(&self, bodies: &mut [RigidBody], dt: f64) -> usize {
        let mut moved = 0;
        for body in bodies.iter_mut() {
            if self.integrate_body(body, dt) {
                moved += 1;
                if !body.is_valid() {
                    warn!("{} has non-finite state after integration", body);
                }
            }
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rectangle;
    use crate::math::CFrame;
    use crate::physics::PhysicalProperties;

    // Mass-spring system: F = -kx, analytical solution: x(t) = A*cos(ωt)
    struct HarmonicOscillator {
        spring_constant: f64,
        mass: f64,
        initial_position: f64,
    }

    impl HarmonicOscillator {
        fn omega(&self) -> f64 {
            (self.spring_constant / self.mass).sqrt()
        }

        fn position_at(&self, t: f64) -> f64 {
            self.initial_position * (self.omega() * t).cos()
        }

        fn energy(&self, x: f64, v: f64) -> f64 {
            0.5 * self.mass * v * v + 0.5 * self.spring_constant * x * x
        }
    }

    fn unit_box(x: f64) -> RigidBody {
        let mut body = RigidBody::new(CFrame::from_position(Vec2::new(x, 0.0)));
        body.add_part(Rectangle::new(1.0, 1.0).into(), CFrame::IDENTITY, PhysicalProperties::new(1.0));
        body
    }

    #[test]
    fn test_harmonic_oscillator_tracks_solution() {
        let osc = HarmonicOscillator {
            spring_constant: 4.0,
            mass: 1.0,
            initial_position: 1.0,
        };
        let integrator = SemiImplicitEuler::new();
        let mut body = unit_box(osc.initial_position);
        let dt = 1e-3;
        let steps = 2000;
        let initial_energy = osc.energy(osc.initial_position, 0.0);

        for _ in 0..steps {
            let x = body.center_of_mass().x;
            body.apply_force_at_center_of_mass(Vec2::new(-osc.spring_constant * x, 0.0));
            integrator.integrate_body(&mut body, dt);
        }

        let t = dt * steps as f64;
        let x = body.center_of_mass().x;
        assert!((x - osc.position_at(t)).abs() < 1e-2);

        let energy = osc.energy(x, body.velocity().x);
        assert!((energy - initial_energy).abs() / initial_energy < 1e-2);
    }

    #[test]
    fn test_validate_timestep() {
        assert!(validate_timestep(1.0 / 60.0).is_ok());
        assert!(validate_timestep(1e-12).is_ok());
        assert!(validate_timestep(2.0).is_ok());
        assert_eq!(validate_timestep(0.0), Err(WorldError::InvalidTimestep(0.0)));
        assert!(validate_timestep(-1.0).is_err());
        assert!(validate_timestep(f64::NAN).is_err());
        assert!(validate_timestep(f64::INFINITY).is_err());
    }

    #[test]
    fn test_integrate_counts_moving_bodies() {
        let mut bodies = vec![unit_box(0.0), unit_box(2.0), RigidBody::new(CFrame::IDENTITY)];
        bodies[1].anchor();
        let moved = SemiImplicitEuler::new().integrate(&mut bodies, 0.01);
        assert_eq!(moved, 1);
    }

    #[test]
    fn test_energy_helpers() {
        let mut a = unit_box(0.0);
        a.set_velocity(Vec2::new(2.0, 0.0));
        let mut b = unit_box(0.0);
        b.set_angular_velocity(6.0);
        let bodies = [a, b];
        // I of a unit square of unit density is 1/6
        assert!((total_kinetic_energy(&bodies) - (2.0 + 3.0)).abs() < 1e-12);

        let g = Vec2::new(0.0, -2.0);
        assert!((total_energy(&bodies, g) - 5.0).abs() < 1e-12);
    }
}
