//! Deferred type resolution for Unknown systems
//!
//! Classification happens once, from static type info, when the hierarchy is
//! built. Some units cannot be classified then, but the live world still
//! knows what they are. At render time this resolver asks the world for the
//! runtime type behind the unit's handle. The answer is only used for
//! display: the node keeps its Unknown category.
//!
//! Lookups are cached per handle for the lifetime of one resolver. Failed
//! lookups are not cached. They are surfaced to the caller, because a unit
//! vanishing from the world mid-report means the snapshot was not quiescent.

use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::domain::{ReportError, SystemHandle};
use crate::hierarchy::SystemNode;
use crate::world::World;

/// Suffix marking a description recovered through the live lookup.
pub const FORMERLY_UNKNOWN: &str = "(formerly Unknown)";

/// Read-through cache of live handle → type lookups
pub struct UnknownTypeResolver<'w, W: ?Sized> {
    world: &'w W,
    cache: HashMap<SystemHandle, String>,
}

impl<'w, W: World + ?Sized> UnknownTypeResolver<'w, W> {
    pub fn new(world: &'w W) -> Self {
        Self { world, cache: HashMap::new() }
    }

    /// Describe an Unknown node as `<runtime type> (formerly Unknown)`.
    ///
    /// # Errors
    /// Returns [`ReportError::Resolve`] if the world cannot resolve the
    /// node's handle.
    pub fn resolve(&mut self, node: &SystemNode) -> Result<String, ReportError> {
        let type_name = self.lookup(node.handle)?;
        Ok(format!("{type_name} {FORMERLY_UNKNOWN}"))
    }

    /// Number of handles resolved so far
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn lookup(&mut self, handle: SystemHandle) -> Result<&str, ReportError> {
        match self.cache.entry(handle) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_str()),
            Entry::Vacant(entry) => {
                debug!("Resolving runtime type of {handle}");
                let type_name = self
                    .world
                    .type_of_system(handle)
                    .map_err(|source| ReportError::Resolve { handle, source })?;
                Ok(entry.insert(type_name).as_str())
            }
        }
    }
}
