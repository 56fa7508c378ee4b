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
//! Shape kernel
//!
//! All shapes are counter-clockwise polygons. Collision detection works on
//! convex pieces only, so every [`Shape`] can be reduced to its
//! [`convex_decomposition`](Shape::convex_decomposition).
//!
//! The modules are layered bottom-up:
//!
//! - [`polygon`]: integrals and predicates over bare corner slices
//! - [`clip`] and [`decompose`]: half-plane clipping and convex splitting
//! - [`collision`]: separating axis queries
//! - the shape types and the [`Shape`] sum type on top

pub mod clip;
pub mod collision;
mod composite;
mod convex;
pub mod decompose;
mod outline;
pub mod polygon;
mod primitives;
mod shape;
mod validate;

pub use composite::CompositePolygon;
pub use convex::ConvexPolygon;
pub use outline::CollisionOutline;
pub use polygon::Polygon;
pub use primitives::{Rectangle, RegularPolygon, Triangle};
pub use shape::Shape;
pub use validate::validate_polygon;
