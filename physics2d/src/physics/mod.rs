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
//! Rigid bodies, contacts, constraints and the world that steps them
//!
//! Ownership is flat: the [`World`] owns every [`RigidBody`] by value, each
//! body owns its [`Part`]s, and every cross reference (part to body,
//! constraint to body, drag to body) is a [`BodyId`].

mod body;
pub mod config;
pub mod constraint;
pub mod contact;
mod drag;
mod handle;
pub mod library;
mod material;
mod part;
mod scheduler;
mod world;

pub use body::RigidBody;
pub use config::WorldConfig;
pub use constraint::{
    CoilPinConstraint, Constraint, Link, PinConstraint, SlideConstraint, SpringPinConstraint,
};
pub use contact::{body_contacts, resolve_contacts, ContactForce, ContactModel, ContactStats};
pub use drag::{Drag, DragCommand, DragHandle, DragModel};
pub use handle::BodyId;
pub use material::PhysicalProperties;
pub use part::Part;
pub use scheduler::{stages, FixedStepScheduler, StageId};
pub use world::{TickStats, World};
