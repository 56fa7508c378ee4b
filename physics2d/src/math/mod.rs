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
//! Linear algebra kernel
//!
//! Pure value types with no dependencies on the rest of the crate: vectors,
//! 2x2 matrices and rotations, rigid frames, bounding boxes, scalar intervals
//! and derived polygon vertices. All of them are `Copy` and freely shareable
//! between threads.

mod bounds;
mod cframe;
mod mat2;
mod vec2;
mod vertex;

pub use bounds::{BoundingBox, Range};
pub use cframe::CFrame;
pub use mat2::{Mat2, RotMat2};
pub use vec2::{NormalizedVec2, Vec2, UNIT_LENGTH_TOLERANCE};
pub use vertex::Vertex2;
