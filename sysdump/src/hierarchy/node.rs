//! Graph vertices and per-category tallies

use crate::classification::SystemCategory;
use crate::domain::SystemHandle;

/// Label used wherever a unit has no static type name.
pub const UNKNOWN_SYSTEM_TYPE: &str = "<unknown system type>";

/// One scheduling unit in the hierarchy graph.
///
/// Parent and child links live on the graph edges, see
/// [`super::Hierarchy::parents`] and [`super::Hierarchy::children_ordered_for_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemNode {
    pub handle: SystemHandle,
    /// Static type name, absent when discovery had no type info
    pub type_name: Option<String>,
    pub category: SystemCategory,
}

impl SystemNode {
    /// Static type name, or the unknown-type placeholder
    #[must_use]
    pub fn type_label(&self) -> &str {
        self.type_name.as_deref().unwrap_or(UNKNOWN_SYSTEM_TYPE)
    }
}

/// Number of nodes per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemCounts {
    pub group: usize,
    pub base: usize,
    pub unmanaged: usize,
    pub unknown: usize,
}

impl SystemCounts {
    pub fn record(&mut self, category: SystemCategory) {
        *self.slot(category) += 1;
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.group + self.base + self.unmanaged + self.unknown
    }

    fn slot(&mut self, category: SystemCategory) -> &mut usize {
        match category {
            SystemCategory::Group => &mut self.group,
            SystemCategory::Base => &mut self.base,
            SystemCategory::Unmanaged => &mut self.unmanaged,
            SystemCategory::Unknown => &mut self.unknown,
        }
    }
}
