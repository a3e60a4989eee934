//! Text report generation
//!
//! This module turns an assembled [`crate::hierarchy::Hierarchy`] into the
//! final diagnostic document. It is the only place that knows about layout;
//! the model itself carries no formatting.

pub mod renderer;

pub use renderer::{system_description, system_type_description, ReportRenderer};

/// Default number of spaces per indentation level.
pub const DEFAULT_SPACES_PER_INDENT: usize = 4;

/// Layout options for [`ReportRenderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Spaces per depth level. Zero collapses all indentation.
    pub spaces_per_indent: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { spaces_per_indent: DEFAULT_SPACES_PER_INDENT }
    }
}
