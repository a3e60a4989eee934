//! World interface and raw discovery data
//!
//! The core never scans a runtime itself. A world provider hands it two
//! things:
//! - a [`World`] it can query by handle while rendering, and
//! - a [`Discovery`] describing every unit found, its static type (if any)
//!   and the groups it declares as parents.
//!
//! [`snapshot::WorldSnapshot`] is the provider shipped with the crate: a
//! JSON capture of a world that implements both sides.

pub mod snapshot;

use serde::{Deserialize, Serialize};

use crate::classification::SystemType;
use crate::domain::{SystemHandle, UpdateOrder, WorldError};
use crate::hierarchy::KnownUnknowns;

pub use snapshot::{SystemRecord, WorldSnapshot};

/// The runtime container being introspected.
///
/// Implementations must stay unchanged for as long as a
/// [`crate::hierarchy::Hierarchy`] borrows them.
pub trait World {
    /// Display name of the world
    fn name(&self) -> &str;

    /// Live lookup of a unit's concrete runtime type name.
    ///
    /// # Errors
    /// Returns [`WorldError::SystemNotFound`] if the world no longer holds
    /// the unit behind `handle`.
    fn type_of_system(&self, handle: SystemHandle) -> Result<String, WorldError>;
}

/// Parent group declared by a unit, with the unit's slot in that group's
/// update sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub group: SystemHandle,
    #[serde(default)]
    pub order: UpdateOrder,
}

impl ParentRef {
    pub fn new(group: impl Into<SystemHandle>, order: usize) -> Self {
        Self { group: group.into(), order: UpdateOrder(order) }
    }
}

/// One raw scheduling unit as found by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDescriptor {
    pub handle: SystemHandle,
    /// Static type, absent when discovery could not attach one
    pub static_type: Option<SystemType>,
    pub parents: Vec<ParentRef>,
}

impl SystemDescriptor {
    pub fn new(handle: impl Into<SystemHandle>, static_type: Option<SystemType>) -> Self {
        Self { handle: handle.into(), static_type, parents: Vec::new() }
    }

    /// Declare `group` as a parent, with this unit at `order` in its updates.
    #[must_use]
    pub fn with_parent(mut self, group: impl Into<SystemHandle>, order: usize) -> Self {
        self.parents.push(ParentRef::new(group, order));
        self
    }
}

/// Everything a world provider found, ready for hierarchy assembly.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Units in discovery order
    pub systems: Vec<SystemDescriptor>,
    pub known_unknowns: KnownUnknowns,
}
