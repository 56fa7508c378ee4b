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
//! Part materials

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default friction coefficient for new materials
pub const DEFAULT_FRICTION: f64 = 0.05;

/// Default fill color, an RGBA brick red. The kernel never reads it.
pub const DEFAULT_COLOR: [f32; 4] = [0.7, 0.3, 0.2, 1.0];

/// Material of a part
///
/// Two touching parts combine their coefficients by multiplication, so a
/// frictionless material makes every contact it takes part in frictionless.
///
/// # Examples
///
/// ```
/// use physics2d::physics::PhysicalProperties;
///
/// let ice = PhysicalProperties::new(9.0).with_friction(0.01);
/// let rubber = PhysicalProperties::new(12.0).with_friction(0.9);
/// assert!((ice.friction_with(&rubber) - 0.009).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicalProperties {
    density: f64,
    friction: f64,
    stickiness: f64,
    color: [f32; 4],
}

impl PhysicalProperties {
    /// Create a material with the given density and default coefficients
    ///
    /// # Panics
    ///
    /// Panics if density is negative, NaN, or infinite
    pub fn new(density: f64) -> Self {
        assert!(
            density >= 0.0 && density.is_finite(),
            "Density must be non-negative and finite"
        );
        PhysicalProperties {
            density,
            friction: DEFAULT_FRICTION,
            stickiness: 0.0,
            color: DEFAULT_COLOR,
        }
    }

    /// Mass per unit area
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Friction coefficient
    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Stickiness; 0 absorbs all separating velocity
    pub fn stickiness(&self) -> f64 {
        self.stickiness
    }

    /// RGBA fill color
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Same material with another density
    pub fn with_density(self, density: f64) -> Self {
        PhysicalProperties { density, ..self }
    }

    /// Same material with another friction coefficient
    pub fn with_friction(self, friction: f64) -> Self {
        PhysicalProperties { friction, ..self }
    }

    /// Same material with another stickiness
    pub fn with_stickiness(self, stickiness: f64) -> Self {
        PhysicalProperties { stickiness, ..self }
    }

    /// Same material with another color
    pub fn with_color(self, color: [f32; 4]) -> Self {
        PhysicalProperties { color, ..self }
    }

    /// Combined friction of a contact between this and `other`
    pub fn friction_with(&self, other: &PhysicalProperties) -> f64 {
        self.friction * other.friction
    }

    /// Combined stickiness of a contact between this and `other`
    pub fn stickiness_with(&self, other: &PhysicalProperties) -> f64 {
        self.stickiness * other.stickiness
    }

    /// Check that every coefficient is finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.density, self.friction, self.stickiness]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}
