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
//! Integration tests for rigid body dynamics
//!
//! These drive bodies through the integrator directly or through a world
//! without contacts, so every expectation follows from Newton's laws alone.

use physics2d::geom::{Rectangle, RegularPolygon, Shape};
use physics2d::integration::{Integrator, SemiImplicitEuler};
use physics2d::math::{CFrame, NormalizedVec2, Vec2};
use physics2d::physics::library::{basic_material, create_box, create_floor};
use physics2d::physics::{PhysicalProperties, RigidBody, World, WorldConfig};

const DT: f64 = 1.0 / 500.0;

/// Two rectangles and a pentagon fused into one lopsided body
fn lopsided_body(frame: CFrame) -> RigidBody {
    let mut body = RigidBody::new(frame).named("lopsided");
    body.add_part(Rectangle::new(1.0, 0.5).into(), CFrame::IDENTITY, basic_material());
    body.add_part(
        Rectangle::new(0.2, 0.8).into(),
        CFrame::new(Vec2::new(0.6, 0.1), 0.2),
        PhysicalProperties::new(30.0),
    );
    body.add_part(
        RegularPolygon::new(5, Vec2::new(0.15, 0.0)).into(),
        CFrame::new(Vec2::new(-0.4, 0.3), -1.0),
        PhysicalProperties::new(5.0),
    );
    body
}

/// The same body, described from a different body origin
fn reframed(body: &RigidBody, offset: CFrame) -> RigidBody {
    let mut other = RigidBody::new(body.frame().local_to_global_frame(&offset));
    for part in body.parts() {
        let relative = offset.global_to_local_frame(&part.relative_cframe());
        other.add_part(part.shape().clone(), relative, *part.material());
    }
    other
}

fn global_corners(body: &RigidBody) -> Vec<Vec2> {
    body.parts()
        .iter()
        .flat_map(|p| p.global_shape(&body.frame()).corners())
        .collect()
}

fn directions() -> Vec<NormalizedVec2> {
    [0.0, 0.4, 1.3, 2.9, -2.2]
        .into_iter()
        .map(NormalizedVec2::from_angle)
        .collect()
}

#[test]
fn test_free_fall_conserves_energy() {
    let mut world = World::new();
    world.add_body(create_floor(
        CFrame::from_position(Vec2::new(0.0, -1000.0)),
        basic_material().with_friction(0.0),
    ));
    let falling = world.add_body(create_box(
        CFrame::new(Vec2::new(0.0, 2.0), 0.3),
        0.5,
        0.5,
        basic_material().with_friction(0.0).with_stickiness(0.0),
    ));
    world.body_mut(falling).unwrap().set_angular_velocity(1.5);

    let mut previous = world.total_energy();
    for _ in 0..10_000 {
        let stats = world.tick(DT).unwrap();
        assert_eq!(stats.contacts, 0);
        let energy = world.total_energy();
        assert!(
            energy <= previous + 1e-8,
            "energy rose from {} to {}",
            previous,
            energy
        );
        previous = energy;
    }
    // 20 seconds at 2 m/s² without touching the floor
    assert!(world.body(falling).unwrap().center_of_mass().y < -300.0);
}

#[test]
fn test_free_fall_follows_parabola() {
    let mut body = create_box(CFrame::IDENTITY, 1.0, 1.0, basic_material());
    body.set_velocity(Vec2::new(1.0, 3.0));
    let gravity = Vec2::new(0.0, -2.0);
    let integrator = SemiImplicitEuler::new();

    let steps = 1000;
    for _ in 0..steps {
        body.apply_force_at_center_of_mass(gravity * body.mass());
        integrator.integrate_body(&mut body, DT);
    }

    let t = steps as f64 * DT;
    let expected = Vec2::new(1.0, 3.0) * t + gravity * (t * t / 2.0);
    assert!((body.center_of_mass() - expected).length() < 1e-9);
}

#[test]
fn test_point_inertia_at_center_is_mass() {
    let bodies = [
        create_box(CFrame::new(Vec2::new(3.0, -1.0), 0.7), 2.0, 0.3, basic_material()),
        lopsided_body(CFrame::new(Vec2::new(-0.5, 0.5), 1.1)),
    ];
    for body in &bodies {
        for dir in directions() {
            let inertia = body.point_inertia_at(body.center_of_mass(), dir);
            assert!((inertia - body.mass()).abs() < 1e-9 * body.mass());
        }
    }
}

#[test]
fn test_point_inertia_never_exceeds_mass() {
    let body = lopsided_body(CFrame::IDENTITY);
    for dir in directions() {
        for offset in [Vec2::new(0.5, 0.0), Vec2::new(-0.2, 0.9), Vec2::new(2.0, 2.0)] {
            let inertia = body.point_inertia(offset, dir);
            assert!(inertia > 0.0);
            assert!(inertia <= body.mass() * (1.0 + 1e-12));
        }
    }
}

#[test]
fn test_mass_properties_independent_of_body_origin() {
    let body = lopsided_body(CFrame::new(Vec2::new(1.0, 2.0), 0.3));
    let other = reframed(&body, CFrame::new(Vec2::new(0.4, -0.3), 0.5));

    assert!((body.mass() - other.mass()).abs() < 1e-12);
    assert!((body.inertia() - other.inertia()).abs() < 1e-12);
    assert!((body.center_of_mass() - other.center_of_mass()).length() < 1e-12);
}

#[test]
fn test_motion_independent_of_body_origin() {
    let mut body = lopsided_body(CFrame::new(Vec2::new(1.0, 2.0), 0.3));
    let mut other = reframed(&body, CFrame::new(Vec2::new(0.4, -0.3), 0.5));
    let integrator = SemiImplicitEuler::new();

    for step in 0..300 {
        // the same world-space push, wandering around the body
        let point = Vec2::new(1.2, 2.1) + Vec2::from_polar(0.3, step as f64 * 0.05);
        let force = Vec2::new(4.0, -1.0 + (step % 7) as f64);
        for b in [&mut body, &mut other] {
            b.apply_force(force, point);
            b.apply_torque(0.5);
            integrator.integrate_body(b, DT);
        }
    }

    assert!((body.velocity() - other.velocity()).length() < 1e-10);
    assert!((body.angular_velocity() - other.angular_velocity()).abs() < 1e-10);
    for (p, q) in global_corners(&body).into_iter().zip(global_corners(&other)) {
        assert!((p - q).length() < 1e-10);
    }
}

#[test]
fn test_action_reaction_conserves_momentum() {
    let mut a = create_box(CFrame::from_position(Vec2::new(-1.0, 0.0)), 1.0, 1.0, basic_material());
    let mut b = lopsided_body(CFrame::from_position(Vec2::new(1.0, 0.5)));
    let integrator = SemiImplicitEuler::new();

    for step in 0..200 {
        let point = Vec2::new(0.0, 0.1 * (step % 5) as f64);
        a.action_reaction(&mut b, point, Vec2::new(-3.0, 1.0));
        integrator.integrate_body(&mut a, DT);
        integrator.integrate_body(&mut b, DT);
    }

    let momentum = a.velocity() * a.mass() + b.velocity() * b.mass();
    assert!(momentum.length() < 1e-9);
}

#[test]
fn test_world_without_gravity_keeps_spin() {
    let config = WorldConfig::default().with_gravity(Vec2::ZERO);
    let mut world = World::with_config(config).unwrap();
    let id = world.add_body(lopsided_body(CFrame::IDENTITY));
    world.body_mut(id).unwrap().set_angular_velocity(2.0);
    let com = world.body(id).unwrap().center_of_mass();
    let energy = world.total_energy();

    for _ in 0..1000 {
        world.tick(DT).unwrap();
    }

    let body = world.body(id).unwrap();
    assert!((body.angular_velocity() - 2.0).abs() < 1e-12);
    assert!((body.center_of_mass() - com).length() < 1e-9);
    assert!((world.total_energy() - energy).abs() < 1e-9);
}

#[test]
fn test_shape_of_part_survives_motion() {
    let mut body = create_box(CFrame::IDENTITY, 0.6, 0.2, basic_material());
    body.set_velocity(Vec2::new(0.5, -0.25));
    body.set_angular_velocity(3.0);
    let integrator = SemiImplicitEuler::new();
    for _ in 0..500 {
        integrator.integrate_body(&mut body, DT);
    }

    let global = body.parts()[0].global_shape(&body.frame());
    assert!(matches!(global, Shape::Rectangle(_) | Shape::Convex(_)));
    assert!((global.area() - 0.12).abs() < 1e-12);
}
