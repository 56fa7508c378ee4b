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
//! Hammer example
//!
//! A hammer with a heavy head is pinned to an anchored peg by the end of its
//! handle and swings under gravity. A coil pin variant with a torsion spring
//! is run alongside for comparison.

use physics2d::math::{CFrame, Vec2};
use physics2d::physics::constraint::attachment_gap;
use physics2d::physics::library::{basic_material, create_box, create_hammer};
use physics2d::physics::{CoilPinConstraint, Link, PinConstraint, World};

fn pendulum(coil: Option<f64>) -> (World, Link) {
    let mut world = World::new();
    let mut peg = create_box(CFrame::from_position(Vec2::new(0.0, 1.0)), 0.02, 0.02, basic_material());
    peg.anchor();
    // pinned just past the end of the handle, head out to the right
    let hammer = create_hammer(CFrame::from_position(Vec2::new(0.45, 1.0)));
    let link = Link::between(&peg, &hammer, CFrame::IDENTITY, CFrame::from_position(Vec2::new(-0.45, 0.0)));
    world.add_bodies([peg, hammer]);

    let added = match coil {
        Some(strength) => world.add_constraint(CoilPinConstraint::new(link, strength)),
        None => world.add_constraint(PinConstraint::new(link)),
    };
    if let Err(e) = added {
        eprintln!("Could not pin hammer: {}", e);
    }
    (world, link)
}

fn report(name: &str, world: &World, link: &Link) {
    let (Some(peg), Some(hammer)) = (world.body(link.a), world.body(link.b)) else {
        return;
    };
    println!(
        "  {:6} angle {:+.3} rad, head at {}, gap {:.5}",
        name,
        hammer.frame().angle(),
        hammer.center_of_mass(),
        attachment_gap(link, peg, hammer).length()
    );
}

fn main() {
    println!("physics2d - Hammer Pendulum");
    println!("===========================\n");

    let (mut free, free_link) = pendulum(None);
    let (mut coiled, coil_link) = pendulum(Some(50.0));

    let hammer = free.body(free_link.b).map(|b| (b.mass(), b.inertia()));
    if let Some((mass, inertia)) = hammer {
        println!("Hammer mass {:.3} kg, inertia {:.5} kg m^2\n", mass, inertia);
    }

    for step in 0..=3000 {
        if step % 500 == 0 {
            println!("t = {:.1}s", step as f64 * 0.002);
            report("pin", &free, &free_link);
            report("coil", &coiled, &coil_link);
        }
        if free.tick(0.002).is_err() || coiled.tick(0.002).is_err() {
            eprintln!("Simulation failed");
            return;
        }
    }
}
