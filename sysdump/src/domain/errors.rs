//! Structured error types for sysdump
//!
//! Using thiserror for automatic Display implementation and error chaining.

use super::types::SystemHandle;
use thiserror::Error;

/// Failures of the live handle lookup against a world
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("System {0} is no longer held by the world")]
    SystemNotFound(SystemHandle),
}

/// Discovery data that cannot be assembled into a hierarchy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("System {0} was discovered more than once")]
    DuplicateHandle(SystemHandle),

    #[error("System {child} declares unknown parent {parent}")]
    UnknownParent { child: SystemHandle, parent: SystemHandle },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to resolve type of {handle}: {source}")]
    Resolve {
        handle: SystemHandle,
        #[source]
        source: WorldError,
    },

    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
