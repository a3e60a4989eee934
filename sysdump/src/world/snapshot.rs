//! JSON world snapshots
//!
//! A snapshot is a one-shot capture of a world taken at a quiescent point:
//! the catalogue of system types discovery knew about, and every unit with
//! its declared parents and (if still alive) its runtime type.
//!
//! ```json
//! {
//!   "name": "TestWorld",
//!   "types": [{ "name": "Sim", "capabilities": ["group", "managed"] }],
//!   "systems": [
//!     { "handle": 1, "type": "Sim", "runtime_type": "Sim" },
//!     { "handle": 2, "runtime_type": "Gen<int>", "parents": [{ "group": 1, "order": 0 }] }
//!   ]
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{Discovery, ParentRef, SystemDescriptor, World};
use crate::classification::SystemType;
use crate::domain::{SnapshotError, SystemHandle, WorldError};
use crate::hierarchy::KnownUnknowns;

/// A unit as recorded in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub handle: SystemHandle,

    /// Name of the static type in the snapshot's type catalogue
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// What the live handle lookup returns; absent once the world dropped the unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<ParentRef>,
}

impl SystemRecord {
    /// Record whose static and runtime types share `type_name`.
    pub fn new(handle: impl Into<SystemHandle>, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            handle: handle.into(),
            runtime_type: Some(type_name.clone()),
            type_name: Some(type_name),
            parents: Vec::new(),
        }
    }

    /// Record discovery could not type statically.
    pub fn untyped(handle: impl Into<SystemHandle>, runtime_type: Option<String>) -> Self {
        Self { handle: handle.into(), type_name: None, runtime_type, parents: Vec::new() }
    }

    #[must_use]
    pub fn with_parent(mut self, group: impl Into<SystemHandle>, order: usize) -> Self {
        self.parents.push(ParentRef::new(group, order));
        self
    }
}

/// On-disk layout of a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SnapshotFile {
    name: String,
    #[serde(default)]
    types: Vec<SystemType>,
    #[serde(default)]
    systems: Vec<SystemRecord>,
}

/// World captured to JSON; serves both discovery and live lookups.
///
/// Records are indexed by handle as they are added, so live lookups do not
/// scan the whole world. When a handle is recorded twice, the first record
/// answers lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SnapshotFile", into = "SnapshotFile")]
pub struct WorldSnapshot {
    file: SnapshotFile,
    by_handle: HashMap<SystemHandle, usize>,
}

impl From<SnapshotFile> for WorldSnapshot {
    fn from(file: SnapshotFile) -> Self {
        let mut by_handle = HashMap::with_capacity(file.systems.len());
        for (position, record) in file.systems.iter().enumerate() {
            by_handle.entry(record.handle).or_insert(position);
        }
        Self { file, by_handle }
    }
}

impl From<WorldSnapshot> for SnapshotFile {
    fn from(snapshot: WorldSnapshot) -> Self {
        snapshot.file
    }
}

impl WorldSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        SnapshotFile { name: name.into(), ..SnapshotFile::default() }.into()
    }

    #[must_use]
    pub fn with_type(mut self, system_type: SystemType) -> Self {
        self.file.types.push(system_type);
        self
    }

    #[must_use]
    pub fn with_system(mut self, record: SystemRecord) -> Self {
        self.by_handle.entry(record.handle).or_insert(self.file.systems.len());
        self.file.systems.push(record);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.file.name
    }

    /// Type catalogue, as captured
    #[must_use]
    pub fn types(&self) -> &[SystemType] {
        &self.file.types
    }

    /// Every recorded unit, in discovery order
    #[must_use]
    pub fn systems(&self) -> &[SystemRecord] {
        &self.file.systems
    }

    #[must_use]
    pub fn record(&self, handle: SystemHandle) -> Option<&SystemRecord> {
        self.by_handle.get(&handle).and_then(|&position| self.file.systems.get(position))
    }

    /// Parse a snapshot file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from a JSON string.
    ///
    /// # Errors
    /// Returns an error if `json` is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Raw discovery data for hierarchy assembly.
    ///
    /// Static types are matched against the catalogue by name; names that
    /// are missing from it leave the unit without type info. Catalogue
    /// entries with unbound generic parameters become known unknowns.
    #[must_use]
    pub fn discover(&self) -> Discovery {
        let catalogue: HashMap<&str, &SystemType> =
            self.types().iter().map(|ty| (ty.name.as_str(), ty)).collect();

        let systems = self
            .systems()
            .iter()
            .map(|record| {
                let static_type = record.type_name.as_deref().and_then(|name| {
                    let found = catalogue.get(name).copied().cloned();
                    if found.is_none() {
                        debug!("{}: type '{name}' missing from catalogue", record.handle);
                    }
                    found
                });

                SystemDescriptor {
                    handle: record.handle,
                    static_type,
                    parents: record.parents.clone(),
                }
            })
            .collect();

        let mut known_unknowns = KnownUnknowns::new();
        for ty in self.types().iter().filter(|ty| ty.contains_generic_parameters) {
            known_unknowns.add_contains_generic_parameters(ty.name.clone());
        }

        Discovery { systems, known_unknowns }
    }
}

impl World for WorldSnapshot {
    fn name(&self) -> &str {
        WorldSnapshot::name(self)
    }

    fn type_of_system(&self, handle: SystemHandle) -> Result<String, WorldError> {
        self.record(handle)
            .and_then(|record| record.runtime_type.clone())
            .ok_or(WorldError::SystemNotFound(handle))
    }
}
