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
//! # physics2d
//!
//! A 2D rigid-body physics kernel: exact polygon geometry, separating-axis
//! collision, penalty contact forces and spring-like constraints, stepped by
//! a fixed-timestep world.
//!
//! ## Features
//!
//! - **Geometry**: general, convex and composite polygons plus rectangle,
//!   triangle and regular polygon primitives, with clipping, union,
//!   intersection and convex decomposition
//! - **Collision**: SAT overlap tests and minimum translation vectors between
//!   convex pieces
//! - **Dynamics**: multi-part rigid bodies with parallel-axis mass
//!   properties and a semi-implicit Euler integrator
//! - **World**: contacts, pin/spring/coil/slide constraints, a thread-safe drag
//!   gesture and a fixed-step scheduler
//! - **Parallelization**: Optional Rayon integration for contact computation
//!
//! ## Example
//!
//! ```rust
//! use physics2d::math::{CFrame, Vec2};
//! use physics2d::physics::{library, World};
//!
//! let mut world = World::new();
//! world.add_body(library::create_floor(CFrame::IDENTITY, library::basic_material()));
//! let block = world.add_body(library::create_box(
//!     CFrame::from_position(Vec2::new(0.0, 0.3)),
//!     0.2,
//!     0.2,
//!     library::basic_material(),
//! ));
//!
//! for _ in 0..2000 {
//!     world.tick(0.002).unwrap();
//! }
//! // resting on the floor, whose top face is at y = 0.1
//! let y = world.body(block).unwrap().center_of_mass().y;
//! assert!((y - 0.2).abs() < 0.02);
//! ```

#![warn(missing_docs)]

/// Error types
pub mod error;

/// Geometry: shapes, clipping, decomposition and collision queries
pub mod geom;

/// Numerical integration methods
pub mod integration;

/// Vectors, matrices, frames and bounds
pub mod math;

/// Rigid bodies, contacts, constraints and the world
pub mod physics;

pub use error::{GeometryError, WorldError};
pub use geom::Shape;
pub use math::{CFrame, Vec2};
pub use physics::{RigidBody, World};
