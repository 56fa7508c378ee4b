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
//! Ready-made bodies
//!
//! Small constructors for the bodies demos and tests keep rebuilding.

use std::f64::consts::FRAC_PI_4;

use crate::geom::{Rectangle, RegularPolygon, Shape};
use crate::math::{CFrame, RotMat2, Vec2};

use super::body::RigidBody;
use super::material::PhysicalProperties;

/// Density 10, friction 0.05, no stickiness
pub fn basic_material() -> PhysicalProperties {
    PhysicalProperties::new(10.0)
}

/// A single free rectangle centred on `frame`
pub fn create_box(frame: CFrame, width: f64, height: f64, material: PhysicalProperties) -> RigidBody {
    let mut body = RigidBody::new(frame).named("box");
    body.add_part(Rectangle::new(width, height).into(), CFrame::IDENTITY, material);
    body
}

/// An anchored 20 by 0.2 slab centred on `frame`
pub fn create_floor(frame: CFrame, material: PhysicalProperties) -> RigidBody {
    let mut body = RigidBody::new(frame).named("floor");
    body.add_part(Rectangle::new(20.0, 0.2).into(), CFrame::IDENTITY, material);
    body.anchor();
    body
}

/// A free regular polygon with its first corner at `radius` along +x
pub fn create_regular_polygon(
    frame: CFrame,
    sides: usize,
    radius: f64,
    material: PhysicalProperties,
) -> RigidBody {
    let mut body = RigidBody::new(frame).named("polygon");
    body.add_part(
        RegularPolygon::new(sides, Vec2::new(radius, 0.0)).into(),
        CFrame::IDENTITY,
        material,
    );
    body
}

/// A heavy diamond head on a light handle reaching to the left
pub fn create_hammer(frame: CFrame) -> RigidBody {
    let head = PhysicalProperties::new(1000.0).with_color([0.3, 0.3, 0.3, 0.6]);
    let arm = PhysicalProperties::new(10.0);
    let mut body = RigidBody::new(frame).named("hammer");
    body.add_part(Rectangle::new(0.1, 0.1).into(), CFrame::new(Vec2::ZERO, FRAC_PI_4), head);
    body.add_part(
        Rectangle::new(0.2, 0.03).into(),
        CFrame::from_position(Vec2::new(-0.3, 0.0)),
        arm,
    );
    body
}

/// A three-slab bowl opening upward, its bottom 0.4 below `frame`
pub fn create_bowl(frame: CFrame, material: PhysicalProperties) -> RigidBody {
    let tilt = RotMat2::from_angle(0.7);
    let bottom = Vec2::new(0.0, -0.4);
    let slab = || Shape::from(Rectangle::new(0.2, 0.05));

    let mut body = RigidBody::new(frame).named("bowl");
    body.add_part(slab(), CFrame::from_position(bottom), material);
    body.add_part(slab(), CFrame::new(tilt.inv() * bottom, -0.7), material);
    body.add_part(slab(), CFrame::new(tilt * bottom, 0.7), material);
    body
}
