//! System category classification.
//!
//! Every scheduling unit discovered in a world is tagged with exactly one
//! [`SystemCategory`] when the hierarchy is assembled. The category is a pure
//! function of the unit's declared static type, so classifying the same type
//! twice always yields the same answer and no state is touched.
//!
//! # Classification Strategy
//!
//! 1. **Missing type info** - discovery could not attach a static type → Unknown
//! 2. **Unresolved generic parameters** - the type cannot be searched for → Unknown
//! 3. **Declared capabilities**, in priority order:
//!    - `group` → Group (a group is itself a managed unit, so it wins over `managed`)
//!    - `managed` → Base
//!    - `unmanaged` → Unmanaged
//! 4. **Nothing declared** → Unknown
//!
//! Unknown is never an error. Those units are counted and later described
//! through the live handle lookup in [`crate::resolver`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a scheduling unit, fixed once at graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCategory {
    /// Unit that contains and orders child units
    Group,
    /// Managed leaf unit (group instances excluded)
    Base,
    /// Lightweight unmanaged leaf unit
    Unmanaged,
    /// Could not be determined statically
    Unknown,
}

impl SystemCategory {
    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(self, SystemCategory::Group)
    }

    /// Returns true for categories that can never own children.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        matches!(self, SystemCategory::Base | SystemCategory::Unmanaged)
    }
}

impl fmt::Display for SystemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SystemCategory::Group => "Group",
            SystemCategory::Base => "Base",
            SystemCategory::Unmanaged => "Unmanaged",
            SystemCategory::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A capability a system type declares about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Schedules and orders child units
    Group,
    /// Runs through the managed execution model
    Managed,
    /// Runs through the unmanaged execution model
    Unmanaged,
}

/// Static type descriptor of a scheduling unit, as declared by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemType {
    /// Fully qualified type name
    pub name: String,

    #[serde(default)]
    pub capabilities: Vec<Capability>,

    /// Type references generic parameters that were never bound.
    #[serde(default)]
    pub contains_generic_parameters: bool,
}

impl SystemType {
    pub fn new(name: impl Into<String>, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            name: name.into(),
            capabilities: capabilities.into_iter().collect(),
            contains_generic_parameters: false,
        }
    }

    /// Type with unbound generic parameters; never classifies statically.
    pub fn generic(name: impl Into<String>, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self { contains_generic_parameters: true, ..Self::new(name, capabilities) }
    }

    #[must_use]
    pub fn declares(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

// =============================================================================
// CLASSIFICATION TABLE
// =============================================================================

/// Capability checks in order of priority.
const CAPABILITY_PRIORITY: [(Capability, SystemCategory); 3] = [
    (Capability::Group, SystemCategory::Group),
    (Capability::Managed, SystemCategory::Base),
    (Capability::Unmanaged, SystemCategory::Unmanaged),
];

/// Classify a scheduling unit from its static type information.
///
/// Total over its input: absent or unsearchable types degrade to
/// [`SystemCategory::Unknown`] instead of failing.
///
/// # Examples
///
/// ```
/// use sysdump::classification::{classify_system, Capability, SystemCategory, SystemType};
///
/// let sim = SystemType::new("SimulationGroup", [Capability::Group, Capability::Managed]);
/// assert_eq!(classify_system(Some(&sim)), SystemCategory::Group);
/// assert_eq!(classify_system(None), SystemCategory::Unknown);
/// ```
#[must_use]
pub fn classify_system(system_type: Option<&SystemType>) -> SystemCategory {
    let Some(system_type) = system_type else {
        return SystemCategory::Unknown;
    };

    if system_type.contains_generic_parameters {
        return SystemCategory::Unknown;
    }

    CAPABILITY_PRIORITY
        .into_iter()
        .find(|(capability, _)| system_type.declares(*capability))
        .map_or(SystemCategory::Unknown, |(_, category)| category)
}
