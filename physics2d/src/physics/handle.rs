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
//! Body handles
//!
//! Bodies are owned by value inside a [`World`](super::World). Everything
//! that needs to refer to a body from the outside (parts, constraints, drag
//! commands, errors) holds a lightweight [`BodyId`] instead of a reference.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(u64);

impl BodyId {
    /// Create a BodyId from a raw u64 value
    pub fn new(id: u64) -> Self {
        BodyId(id)
    }

    /// Allocate a fresh id, unique within this process
    pub fn next() -> Self {
        BodyId(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_id_raw() {
        let id = BodyId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.to_string(), "Body(42)");
    }

    #[test]
    fn test_next_is_unique() {
        let a = BodyId::next();
        let b = BodyId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
