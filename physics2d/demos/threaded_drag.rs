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
//! Threaded drag example
//!
//! An input thread grabs a box and drags it in a circle while the main
//! thread ticks the world. Commands travel through a [`DragHandle`] and are
//! picked up at the start of the next drag update.
//!
//! [`DragHandle`]: physics2d::physics::DragHandle

use std::thread;
use std::time::Duration;

use physics2d::math::{CFrame, Vec2};
use physics2d::physics::library::{basic_material, create_box, create_floor};
use physics2d::physics::World;

fn main() {
    println!("physics2d - Threaded Drag");
    println!("=========================\n");

    let mut world = World::new();
    world.add_body(create_floor(CFrame::IDENTITY, basic_material()));
    let block = world.add_body(create_box(
        CFrame::from_position(Vec2::new(0.0, 0.2)),
        0.2,
        0.2,
        basic_material(),
    ));

    let handle = world.drag_handle();
    let input = thread::spawn(move || {
        handle.grab(Vec2::new(0.05, 0.25));
        for step in 0..=40 {
            let angle = step as f64 * std::f64::consts::TAU / 40.0;
            handle.drag(Vec2::new(0.0, 1.0) + Vec2::from_polar(0.5, angle));
            thread::sleep(Duration::from_millis(5));
        }
        handle.drop();
    });

    let mut ticks = 0;
    while !input.is_finished() {
        if let Err(e) = world.tick(0.002) {
            eprintln!("Simulation failed: {}", e);
            return;
        }
        ticks += 1;
        if ticks % 250 == 0 {
            if let Some(body) = world.body(block) {
                let com = body.center_of_mass();
                let target = world.dragged().map(|d| d.target);
                println!("tick {:5}: box at ({:.3}, {:.3}), target {:?}", ticks, com.x, com.y, target);
            }
        }
        thread::sleep(Duration::from_micros(200));
    }
    if input.join().is_err() {
        eprintln!("Input thread panicked");
        return;
    }

    // let the box fall back after the drop
    for _ in 0..1500 {
        if world.tick(0.002).is_err() {
            return;
        }
    }
    if let Some(body) = world.body(block) {
        println!("\nReleased after {} ticks, box settled at {}", ticks, body.center_of_mass());
    }
    println!("Still dragging: {}", world.dragged().is_some());
}
