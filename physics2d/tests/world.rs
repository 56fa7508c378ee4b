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
//! Integration tests for whole-world scenarios
//!
//! Each test builds a small scene from the body library and ticks it at the
//! default 500 Hz until it settles.

use std::thread;

use physics2d::geom::Polygon;
use physics2d::math::{CFrame, Vec2};
use physics2d::physics::constraint::attachment_gap;
use physics2d::physics::library::{
    basic_material, create_bowl, create_box, create_floor, create_hammer, create_regular_polygon,
};
use physics2d::physics::{
    FixedStepScheduler, Link, PinConstraint, RigidBody, SlideConstraint, SpringPinConstraint,
    World, WorldConfig,
};

const DT: f64 = 1.0 / 500.0;

fn run(world: &mut World, ticks: usize) {
    for _ in 0..ticks {
        world.tick(DT).unwrap();
    }
}

fn weightless() -> World {
    World::with_config(WorldConfig::default().with_gravity(Vec2::ZERO)).unwrap()
}

#[test]
fn test_box_comes_to_rest_on_floor() {
    let mut world = World::new();
    world.add_body(create_floor(CFrame::IDENTITY, basic_material()));
    let block = world.add_body(create_box(
        CFrame::from_position(Vec2::new(0.0, 0.5)),
        0.2,
        0.2,
        basic_material(),
    ));
    let start = world.total_energy();

    run(&mut world, 2000);

    let body = world.body(block).unwrap();
    assert!((body.center_of_mass().y - 0.2).abs() < 0.01);
    assert!(body.center_of_mass().x.abs() < 0.01);
    assert!(body.velocity().length() < 0.01);
    assert!(world.last_stats().contacts > 0);
    assert!(world.total_energy() < start);
}

#[test]
fn test_polygon_settles_in_anchored_bowl() {
    let mut world = World::new();
    let mut bowl = create_bowl(CFrame::IDENTITY, basic_material());
    bowl.anchor();
    world.add_body(bowl);
    let ball = world.add_body(create_regular_polygon(
        CFrame::from_position(Vec2::new(0.0, -0.2)),
        6,
        0.05,
        basic_material(),
    ));

    run(&mut world, 2000);

    // bottom slab top face at -0.375, hexagon flat side 0.05 * sin 60° below its centre
    let com = world.body(ball).unwrap().center_of_mass();
    let rest = -0.375 + 0.05 * (std::f64::consts::PI / 3.0).sin();
    assert!((com.y - rest).abs() < 0.01, "ball at {}", com);
    assert!(com.x.abs() < 0.1);
}

#[test]
fn test_hammer_lands_on_floor() {
    let mut world = World::new();
    world.add_body(create_floor(CFrame::IDENTITY, basic_material()));
    let hammer = world.add_body(create_hammer(CFrame::new(Vec2::new(0.0, 0.5), 0.2)));

    run(&mut world, 3000);

    let body = world.body(hammer).unwrap();
    assert!(body.is_valid());
    let y = body.center_of_mass().y;
    assert!(y > 0.1 && y < 0.3, "hammer at height {}", y);
}

#[test]
fn test_pin_holds_hanging_box() {
    let mut world = World::new();
    let mut anchor = create_box(CFrame::from_position(Vec2::new(0.0, 1.0)), 0.05, 0.05, basic_material());
    anchor.anchor();
    let weight = create_box(CFrame::from_position(Vec2::new(0.0, 0.7)), 0.1, 0.1, basic_material());
    let link = Link::between(
        &anchor,
        &weight,
        CFrame::IDENTITY,
        CFrame::from_position(Vec2::new(0.0, 0.3)),
    );
    world.add_bodies([anchor, weight]);
    world.add_constraint(PinConstraint::new(link)).unwrap();

    run(&mut world, 2000);

    let a = world.body(link.a).unwrap();
    let b = world.body(link.b).unwrap();
    let gap = attachment_gap(&link, a, b);
    // static sag is g / strength
    assert!((gap.y + 2.0 / 3000.0).abs() < 1e-4, "gap {}", gap);
    assert!(gap.x.abs() < 1e-6);
    assert_eq!(world.last_stats().constraints_enacted, 1);
}

#[test]
fn test_swinging_pin_stays_attached() {
    let mut world = World::new();
    let mut anchor = create_box(CFrame::from_position(Vec2::new(0.0, 1.0)), 0.05, 0.05, basic_material());
    anchor.anchor();
    let mut weight = create_box(CFrame::from_position(Vec2::new(0.0, 0.7)), 0.1, 0.1, basic_material());
    weight.set_velocity(Vec2::new(0.5, 0.0));
    let link = Link::between(
        &anchor,
        &weight,
        CFrame::IDENTITY,
        CFrame::from_position(Vec2::new(0.0, 0.3)),
    );
    world.add_bodies([anchor, weight]);
    world.add_constraint(PinConstraint::new(link)).unwrap();

    for _ in 0..2000 {
        world.tick(DT).unwrap();
        let gap = attachment_gap(&link, world.body(link.a).unwrap(), world.body(link.b).unwrap());
        assert!(gap.length() < 0.05);
    }
}

#[test]
fn test_slide_matches_spin() {
    let mut world = weightless();
    let mut first = create_box(CFrame::from_position(Vec2::new(-2.0, 0.0)), 1.0, 1.0, basic_material());
    first.set_angular_velocity(2.0);
    let second = create_box(CFrame::from_position(Vec2::new(2.0, 0.0)), 2.0, 1.0, basic_material());
    let link = Link::between(&first, &second, CFrame::IDENTITY, CFrame::IDENTITY);
    let momentum =
        |w: &World| w.bodies().iter().map(|b| b.angular_impulse()).sum::<f64>();
    world.add_bodies([first, second]);
    world.add_constraint(SlideConstraint::new(link)).unwrap();
    let before = momentum(&world);

    run(&mut world, 10);

    let a = world.body(link.a).unwrap();
    let b = world.body(link.b).unwrap();
    assert!((a.angular_velocity() - b.angular_velocity()).abs() < 1e-9);
    assert!((momentum(&world) - before).abs() < 1e-9);
}

#[test]
fn test_spring_pulls_bodies_together() {
    let mut world = weightless();
    let left = create_box(CFrame::from_position(Vec2::new(-1.0, 0.0)), 0.2, 0.2, basic_material());
    let right = create_box(CFrame::from_position(Vec2::new(1.0, 0.0)), 0.2, 0.2, basic_material());
    let link = Link::between(&left, &right, CFrame::IDENTITY, CFrame::IDENTITY);
    world.add_bodies([left, right]);
    world.add_constraint(SpringPinConstraint::new(link, 1.0)).unwrap();

    run(&mut world, 200);

    let a = world.body(link.a).unwrap();
    let b = world.body(link.b).unwrap();
    assert!(attachment_gap(&link, a, b).length() < 2.0);
    let momentum = a.velocity() * a.mass() + b.velocity() * b.mass();
    assert!(momentum.length() < 1e-12);
}

#[test]
fn test_drag_from_input_thread() {
    let mut world = weightless();
    let block = world.add_body(create_box(CFrame::IDENTITY, 0.2, 0.2, basic_material()));
    let handle = world.drag_handle();

    thread::spawn(move || {
        handle.grab(Vec2::ZERO);
        handle.drag(Vec2::new(1.0, 0.5));
    })
    .join()
    .unwrap();

    run(&mut world, 2000);
    assert_eq!(world.dragged().map(|d| d.body), Some(block));
    let com = world.body(block).unwrap().center_of_mass();
    assert!((com - Vec2::new(1.0, 0.5)).length() < 1e-3, "block at {}", com);

    let handle = world.drag_handle();
    thread::spawn(move || handle.drop()).join().unwrap();
    world.tick(DT).unwrap();
    assert!(world.dragged().is_none());
}

#[test]
fn test_grab_misses_empty_space() {
    let mut world = weightless();
    world.add_body(create_box(CFrame::IDENTITY, 0.2, 0.2, basic_material()));
    world.drag_handle().grab(Vec2::new(5.0, 5.0));
    world.tick(DT).unwrap();
    assert!(world.dragged().is_none());
}

#[test]
fn test_grab_in_notch_of_concave_body() {
    let mut world = weightless();
    let outline = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(3.0, 0.0),
        Vec2::new(3.0, 2.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(2.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 2.0),
        Vec2::new(0.0, 2.0),
    ];
    let mut u = RigidBody::new(CFrame::IDENTITY);
    u.add_part(Polygon::new(outline).unwrap().into(), CFrame::IDENTITY, basic_material());
    let id = world.add_body(u);

    // level with both arm tops, inside the open notch
    assert_eq!(world.part_at(Vec2::new(1.5, 2.0)), None);
    assert_eq!(world.part_at(Vec2::new(1.5, 1.5)), None);
    assert_eq!(world.grab_block(Vec2::new(1.5, 2.0)), None);
    assert!(world.dragged().is_none());

    assert_eq!(world.part_at(Vec2::new(0.5, 1.5)), Some((id, 0)));
    assert_eq!(world.part_at(Vec2::new(2.5, 1.0)), Some((id, 0)));
    assert_eq!(world.grab_block(Vec2::new(1.5, 0.5)), Some(id));
}

#[test]
fn test_removing_body_mid_simulation() {
    let mut world = World::new();
    world.add_body(create_floor(CFrame::IDENTITY, basic_material()));
    let first = world.add_body(create_box(CFrame::from_position(Vec2::new(-1.0, 0.5)), 0.2, 0.2, basic_material()));
    let second = world.add_body(create_box(CFrame::from_position(Vec2::new(1.0, 0.5)), 0.2, 0.2, basic_material()));
    run(&mut world, 100);

    world.remove_body(first).unwrap();
    run(&mut world, 100);

    assert!(world.body(first).is_none());
    assert_eq!(world.body_count(), 2);
    assert!(world.body(second).unwrap().is_valid());
}

#[test]
fn test_scheduler_drives_world() {
    let mut world = World::new();
    world.add_body(create_floor(CFrame::IDENTITY, basic_material()));
    let mut scheduler = FixedStepScheduler::for_world(&world);

    let mut total = 0;
    for _ in 0..60 {
        total += scheduler.advance(&mut world, 1.0 / 60.0).unwrap();
    }
    // one second of frames at 500 Hz, give or take rounding at the edges
    assert!((499..=500).contains(&total));
    assert_eq!(world.step_count(), total as u64);

    // a one second hitch is capped
    let steps = scheduler.advance(&mut world, 1.0).unwrap();
    assert_eq!(steps, scheduler.max_substeps());
    assert!(scheduler.alpha() < 1.0);
}
