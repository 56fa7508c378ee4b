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
//! Benchmarks for full world ticks
//!
//! A tick runs integration, gravity, contacts and constraints, so these
//! numbers bound the frame budget of an interactive scene.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use physics2d::math::{CFrame, Vec2};
use physics2d::physics::library::{basic_material, create_box, create_floor, create_hammer};
use physics2d::physics::{FixedStepScheduler, Link, PinConstraint, World};

const DT: f64 = 1.0 / 500.0;

fn scene(boxes: usize) -> World {
    let mut world = World::new();
    world.add_body(create_floor(CFrame::IDENTITY, basic_material()));
    for i in 0..boxes {
        let x = (i % 20) as f64 * 0.25 - 2.5;
        let y = 0.3 + (i / 20) as f64 * 0.25;
        world.add_body(create_box(CFrame::from_position(Vec2::new(x, y)), 0.2, 0.2, basic_material()));
    }
    world
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_tick");
    group.sample_size(20);

    for boxes in [10, 100, 400].iter() {
        group.throughput(Throughput::Elements(*boxes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(boxes), boxes, |bench, &boxes| {
            let mut world = scene(boxes);
            // let the pile settle into contact first
            for _ in 0..200 {
                let _ = world.tick(DT);
            }
            bench.iter(|| black_box(world.tick(DT)))
        });
    }

    group.finish();
}

fn bench_constrained_chain(c: &mut Criterion) {
    let mut world = World::new();
    let mut previous = create_box(CFrame::from_position(Vec2::new(0.0, 2.0)), 0.05, 0.05, basic_material());
    previous.anchor();
    let mut links = Vec::new();
    let mut bodies = vec![previous];
    for i in 1..=50 {
        let next = create_hammer(CFrame::from_position(Vec2::new(i as f64 * 0.5, 2.0)));
        links.push(Link::between(
            &bodies[i - 1],
            &next,
            CFrame::IDENTITY,
            CFrame::from_position(Vec2::new(-0.4, 0.0)),
        ));
        bodies.push(next);
    }
    world.add_bodies(bodies);
    for link in links {
        let _ = world.add_constraint(PinConstraint::new(link));
    }

    c.bench_function("pinned_hammer_chain_tick", |bench| {
        bench.iter(|| black_box(world.tick(DT)))
    });
}

fn bench_scheduler_frame(c: &mut Criterion) {
    let mut world = scene(50);
    let mut scheduler = FixedStepScheduler::for_world(&world);

    c.bench_function("scheduler_60hz_frame", |bench| {
        bench.iter(|| black_box(scheduler.advance(&mut world, 1.0 / 60.0)))
    });
}

criterion_group!(benches, bench_tick, bench_constrained_chain, bench_scheduler_frame);
criterion_main!(benches);
