//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep world handles from being mixed up with
//! positions, counts or graph indices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, world-scoped reference to a scheduling unit
///
/// Only meaningful to the world that issued it. The core never interprets
/// the value; it is passed back to [`crate::world::World::type_of_system`]
/// for live lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemHandle(pub u64);

impl fmt::Display for SystemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle:{}", self.0)
    }
}

impl From<u64> for SystemHandle {
    fn from(raw: u64) -> Self {
        SystemHandle(raw)
    }
}

/// Position of a unit inside its parent group's update sequence
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UpdateOrder(pub usize);
