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
//! Falling boxes example
//!
//! Drops a column of boxes onto the floor and prints the height of each box
//! once per simulated second, along with the total energy of the scene.

use physics2d::math::{CFrame, Vec2};
use physics2d::physics::library::{basic_material, create_box, create_floor, create_regular_polygon};
use physics2d::physics::{FixedStepScheduler, World};

fn main() {
    println!("physics2d - Falling Boxes");
    println!("=========================\n");

    let mut world = World::new();
    world.add_body(create_floor(CFrame::IDENTITY, basic_material()));

    let mut falling = Vec::new();
    for i in 0..5 {
        let frame = CFrame::new(Vec2::new(0.05 * i as f64, 0.5 + 0.3 * i as f64), 0.1 * i as f64);
        falling.push(world.add_body(create_box(frame, 0.2, 0.2, basic_material())));
    }
    falling.push(world.add_body(create_regular_polygon(
        CFrame::from_position(Vec2::new(0.0, 2.5)),
        6,
        0.1,
        basic_material(),
    )));

    println!("Created {} bodies, integrator: {}", world.body_count(), world.integrator_name());
    println!("Initial energy: {:.4} J\n", world.total_energy());

    // render at 60 Hz, simulate at the configured 500 Hz
    let mut scheduler = FixedStepScheduler::for_world(&world);
    for second in 1..=5 {
        for _ in 0..60 {
            if let Err(e) = scheduler.advance(&mut world, 1.0 / 60.0) {
                eprintln!("Simulation failed: {}", e);
                return;
            }
        }

        println!("t = {}s", second);
        for id in &falling {
            if let Some(body) = world.body(*id) {
                let com = body.center_of_mass();
                println!("  {}: ({:.3}, {:.3})  speed {:.4}", body, com.x, com.y, body.velocity().length());
            }
        }
        let stats = world.last_stats();
        println!(
            "  energy {:.4} J, {} contacts over {} pairs\n",
            world.total_energy(),
            stats.contacts,
            stats.pairs_tested
        );
    }

    println!("Ran {} ticks", world.step_count());
}
