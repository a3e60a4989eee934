//! Hierarchy report renderer
//!
//! Produces the nested text report. Sections are emitted in a fixed order and
//! only when they have content; each one is followed by two blank lines, the
//! multiple-groups section by four.
//!
//! ```text
//! Information about systems in world: TestWorld
//!
//!
//! [Counts]
//! Group: 1
//! Base (excluding group instances): 2
//! Unmanaged: 0
//! <unknown system type>: 0
//!
//!
//! [Update Hierarchy] note: the ordering at root level is arbitrary, ...
//! Sim (Group) | 2 children
//!     A (Base)
//!     B (Base)
//! ```

use log::{debug, warn};
use petgraph::graph::NodeIndex;
use std::fmt::Write;

use super::ReportOptions;
use crate::classification::SystemCategory;
use crate::domain::ReportError;
use crate::hierarchy::{Hierarchy, SystemCounts, SystemNode, UNKNOWN_SYSTEM_TYPE};
use crate::resolver::UnknownTypeResolver;
use crate::world::World;

// =============================================================================
// SECTION HEADERS
// =============================================================================

const COUNTS_HEADER: &str = "[Counts]";

const KNOWN_UNKNOWNS_HEADER: &str =
    "[Known Unknowns] - systems of <unknown system type> are likely one of these";

const GENERIC_PARAMETERS_ISSUE: &str =
    "Issue: Cannot search for systems using Types containing unknown generic parameters";

const MULTIPLE_PARENTS_HEADER: &str =
    "[Systems in multiple groups] - this probably shouldn't happen!";

const UPDATE_HIERARCHY_HEADER: &str = "[Update Hierarchy] note: the ordering at root level is \
     arbitrary, but everything within a group is in update order for that group";

/// Joins the fields of a single node line
const FIELD_SEPARATOR: &str = " | ";

/// Renders a [`Hierarchy`] into the diagnostic text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    options: ReportOptions,
}

impl ReportRenderer {
    #[must_use]
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Render the full report.
    ///
    /// The report is returned whole or not at all: Unknown systems are
    /// resolved against the live world while rendering, and any failed
    /// lookup aborts generation.
    ///
    /// # Errors
    /// Returns [`ReportError::Resolve`] if the world cannot resolve the
    /// handle of an Unknown system.
    pub fn render<W: World + ?Sized>(&self, hierarchy: &Hierarchy<'_, W>) -> Result<String, ReportError> {
        let mut out = String::new();
        let mut resolver = UnknownTypeResolver::new(hierarchy.world());

        writeln!(out, "Information about systems in world: {}", hierarchy.world().name())?;
        end_section(&mut out);

        write_counts(&mut out, hierarchy.counts())?;
        end_section(&mut out);

        if hierarchy.counts().unknown > 0 && hierarchy.known_unknowns().are_known() {
            self.write_known_unknowns(&mut out, hierarchy)?;
            end_section(&mut out);
        }

        let multiple_parents = hierarchy.find_nodes_with_multiple_parents();
        if !multiple_parents.is_empty() {
            self.write_multiple_parents(&mut out, hierarchy, &multiple_parents, &mut resolver)?;
            end_section(&mut out);
            end_section(&mut out);
        }

        if !hierarchy.root_nodes_unordered().is_empty() {
            self.write_update_hierarchy(&mut out, hierarchy, &mut resolver)?;
            end_section(&mut out);
        }

        debug!(
            "Rendered report for '{}': {} bytes, {} unknown systems resolved",
            hierarchy.world().name(),
            out.len(),
            resolver.cached()
        );

        Ok(out)
    }

    fn write_known_unknowns<W: World + ?Sized>(
        &self,
        out: &mut String,
        hierarchy: &Hierarchy<'_, W>,
    ) -> Result<(), ReportError> {
        let generic = hierarchy.known_unknowns().contains_generic_parameters();

        writeln!(out, "{KNOWN_UNKNOWNS_HEADER}")?;
        if !generic.is_empty() {
            writeln!(out, "{GENERIC_PARAMETERS_ISSUE}")?;
            for type_name in generic {
                self.indent(out, 1);
                writeln!(out, "{type_name}")?;
            }
        }
        Ok(())
    }

    fn write_multiple_parents<W: World + ?Sized>(
        &self,
        out: &mut String,
        hierarchy: &Hierarchy<'_, W>,
        nodes: &[NodeIndex],
        resolver: &mut UnknownTypeResolver<'_, W>,
    ) -> Result<(), ReportError> {
        writeln!(out, "{MULTIPLE_PARENTS_HEADER}")?;
        for &index in nodes {
            let description = system_type_description(hierarchy.node(index), resolver)?;
            let parents = hierarchy.parents(index);
            writeln!(out, "{description} - belongs to {} groups", parents.len())?;

            for parent in parents {
                self.indent(out, 1);
                writeln!(out, "{}", system_type_description(hierarchy.node(parent), resolver)?)?;
            }
        }
        Ok(())
    }

    fn write_update_hierarchy<W: World + ?Sized>(
        &self,
        out: &mut String,
        hierarchy: &Hierarchy<'_, W>,
        resolver: &mut UnknownTypeResolver<'_, W>,
    ) -> Result<(), ReportError> {
        writeln!(out, "{UPDATE_HIERARCHY_HEADER}")?;
        let mut path = Vec::new();
        for &root in hierarchy.root_nodes_unordered() {
            self.write_tree_node(out, hierarchy, resolver, &mut path, root, 0)?;
        }
        Ok(())
    }

    /// Depth-first, pre-order: the node, then its children in update order.
    ///
    /// `path` holds the ancestors of `index`. A node that is its own
    /// ancestor is written once more and not descended into again.
    fn write_tree_node<W: World + ?Sized>(
        &self,
        out: &mut String,
        hierarchy: &Hierarchy<'_, W>,
        resolver: &mut UnknownTypeResolver<'_, W>,
        path: &mut Vec<NodeIndex>,
        index: NodeIndex,
        depth: usize,
    ) -> Result<(), ReportError> {
        self.indent(out, depth);
        writeln!(out, "{}", system_description(hierarchy, index, resolver)?)?;

        if path.contains(&index) {
            warn!("{} is its own ancestor, not descending again", hierarchy.node(index).handle);
            return Ok(());
        }

        path.push(index);
        for child in hierarchy.children_ordered_for_update(index) {
            self.write_tree_node(out, hierarchy, resolver, path, child, depth + 1)?;
        }
        path.pop();
        Ok(())
    }

    fn indent(&self, out: &mut String, depth: usize) {
        let width = self.options.spaces_per_indent.saturating_mul(depth);
        out.extend(std::iter::repeat_n(' ', width));
    }
}

fn write_counts(out: &mut String, counts: SystemCounts) -> std::fmt::Result {
    writeln!(out, "{COUNTS_HEADER}")?;
    writeln!(out, "Group: {}", counts.group)?;
    writeln!(out, "Base (excluding group instances): {}", counts.base)?;
    writeln!(out, "Unmanaged: {}", counts.unmanaged)?;
    writeln!(out, "{UNKNOWN_SYSTEM_TYPE}: {}", counts.unknown)
}

fn end_section(out: &mut String) {
    out.push_str("\n\n");
}

/// Single-line description of a node.
///
/// Type description, then `N children` for groups, then `N parents` when the
/// node sits in more than one group, joined with ` | `.
///
/// # Errors
/// Returns [`ReportError::Resolve`] if the node is Unknown and its handle
/// cannot be resolved.
pub fn system_description<W: World + ?Sized>(
    hierarchy: &Hierarchy<'_, W>,
    index: NodeIndex,
    resolver: &mut UnknownTypeResolver<'_, W>,
) -> Result<String, ReportError> {
    let node = hierarchy.node(index);
    let mut parts = vec![system_type_description(node, resolver)?];

    if node.category.is_group() {
        parts.push(format!("{} children", hierarchy.children_ordered_for_update(index).len()));
    }

    let parent_count = hierarchy.parent_count(index);
    if parent_count > 1 {
        parts.push(format!("{parent_count} parents"));
    }

    Ok(parts.join(FIELD_SEPARATOR))
}

/// `TypeName (Category)`, or the live-resolved description for Unknown nodes.
///
/// # Errors
/// Returns [`ReportError::Resolve`] if the node is Unknown and its handle
/// cannot be resolved.
pub fn system_type_description<W: World + ?Sized>(
    node: &SystemNode,
    resolver: &mut UnknownTypeResolver<'_, W>,
) -> Result<String, ReportError> {
    match node.category {
        SystemCategory::Unknown => resolver.resolve(node),
        category => Ok(format!("{} ({category})", node.type_label())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{Capability, SystemType};
    use crate::domain::{SystemHandle, WorldError};
    use crate::world::{SystemRecord, WorldSnapshot};

    fn render(snapshot: &WorldSnapshot, spaces_per_indent: usize) -> Result<String, ReportError> {
        let hierarchy = Hierarchy::build(snapshot, snapshot.discover()).unwrap();
        ReportRenderer::new(ReportOptions { spaces_per_indent }).render(&hierarchy)
    }

    /// Lines of the section starting with `header`, up to the next blank line
    fn section<'a>(report: &'a str, header: &str) -> Option<Vec<&'a str>> {
        let mut lines = report.lines().skip_while(|line| !line.starts_with(header));
        lines.next()?;
        Some(lines.take_while(|line| !line.is_empty()).collect())
    }

    fn group_type(name: &str) -> SystemType {
        SystemType::new(name, [Capability::Group, Capability::Managed])
    }

    fn base_type(name: &str) -> SystemType {
        SystemType::new(name, [Capability::Managed])
    }

    fn sim_world() -> WorldSnapshot {
        WorldSnapshot::new("TestWorld")
            .with_type(group_type("Sim"))
            .with_type(base_type("A"))
            .with_type(base_type("B"))
            .with_system(SystemRecord::new(1, "Sim"))
            .with_system(SystemRecord::new(2, "A").with_parent(1, 0))
            .with_system(SystemRecord::new(3, "B").with_parent(1, 1))
    }

    #[test]
    fn test_simple_world_full_report() {
        let report = render(&sim_world(), 4).unwrap();

        let expected = "\
Information about systems in world: TestWorld


[Counts]
Group: 1
Base (excluding group instances): 2
Unmanaged: 0
<unknown system type>: 0


[Update Hierarchy] note: the ordering at root level is arbitrary, but everything within a group is in update order for that group
Sim (Group) | 2 children
    A (Base)
    B (Base)


";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_multiple_parents_section() {
        let snapshot = WorldSnapshot::new("W")
            .with_type(group_type("G1"))
            .with_type(group_type("G2"))
            .with_type(base_type("X"))
            .with_system(SystemRecord::new(1, "G1"))
            .with_system(SystemRecord::new(2, "G2"))
            .with_system(SystemRecord::new(3, "X").with_parent(1, 0).with_parent(2, 0));

        let report = render(&snapshot, 4).unwrap();

        assert_eq!(
            section(&report, MULTIPLE_PARENTS_HEADER).unwrap(),
            ["X (Base) - belongs to 2 groups", "    G1 (Group)", "    G2 (Group)"]
        );
        assert_eq!(
            section(&report, UPDATE_HIERARCHY_HEADER).unwrap(),
            [
                "G1 (Group) | 1 children",
                "    X (Base) | 2 parents",
                "G2 (Group) | 1 children",
                "    X (Base) | 2 parents",
            ]
        );
    }

    #[test]
    fn test_multiple_parents_section_is_followed_by_four_blank_lines() {
        let snapshot = WorldSnapshot::new("W")
            .with_type(group_type("G1"))
            .with_type(group_type("G2"))
            .with_type(base_type("X"))
            .with_system(SystemRecord::new(1, "G1"))
            .with_system(SystemRecord::new(2, "G2"))
            .with_system(SystemRecord::new(3, "X").with_parent(1, 0).with_parent(2, 0));

        let report = render(&snapshot, 4).unwrap();

        assert!(report.contains(&format!("    G2 (Group)\n\n\n\n\n{UPDATE_HIERARCHY_HEADER}\n")));
    }

    #[test]
    fn test_unknown_system_in_multiple_groups_is_resolved() {
        let snapshot = WorldSnapshot::new("W")
            .with_type(group_type("G1"))
            .with_type(group_type("G2"))
            .with_system(SystemRecord::new(1, "G1"))
            .with_system(SystemRecord::new(2, "G2"))
            .with_system(
                SystemRecord::untyped(3, Some("Spawn<Enemy>".to_string())).with_parent(1, 0).with_parent(2, 0),
            );

        let report = render(&snapshot, 4).unwrap();

        assert_eq!(
            section(&report, MULTIPLE_PARENTS_HEADER).unwrap(),
            ["Spawn<Enemy> (formerly Unknown) - belongs to 2 groups", "    G1 (Group)", "    G2 (Group)"]
        );
    }

    #[test]
    fn test_stale_system_in_multiple_groups_aborts_report() {
        let snapshot = WorldSnapshot::new("W")
            .with_type(group_type("G1"))
            .with_type(group_type("G2"))
            .with_system(SystemRecord::new(1, "G1"))
            .with_system(SystemRecord::new(2, "G2"))
            .with_system(SystemRecord::untyped(3, None).with_parent(1, 0).with_parent(2, 0));

        let err = render(&snapshot, 4).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Resolve { handle: SystemHandle(3), source: WorldError::SystemNotFound(_) }
        ));
    }

    #[test]
    fn test_no_multiple_parents_section_for_tree() {
        let report = render(&sim_world(), 4).unwrap();
        assert!(section(&report, MULTIPLE_PARENTS_HEADER).is_none());
    }

    #[test]
    fn test_known_unknowns_listed_when_unknown_present() {
        let snapshot = WorldSnapshot::new("W")
            .with_type(group_type("Sim"))
            .with_type(SystemType::generic("Spawn<T>", [Capability::Managed]))
            .with_system(SystemRecord::new(1, "Sim"))
            .with_system(SystemRecord::untyped(2, Some("Spawn<Enemy>".to_string())).with_parent(1, 0));

        let report = render(&snapshot, 2).unwrap();

        assert_eq!(
            section(&report, KNOWN_UNKNOWNS_HEADER).unwrap(),
            [GENERIC_PARAMETERS_ISSUE, "  Spawn<T>"]
        );
        assert_eq!(
            section(&report, UPDATE_HIERARCHY_HEADER).unwrap(),
            ["Sim (Group) | 1 children", "  Spawn<Enemy> (formerly Unknown)"]
        );
    }

    #[test]
    fn test_known_unknowns_omitted_without_unknown_systems() {
        let snapshot = sim_world().with_type(SystemType::generic("Spawn<T>", [Capability::Managed]));
        let report = render(&snapshot, 4).unwrap();

        assert!(section(&report, KNOWN_UNKNOWNS_HEADER).is_none());
    }

    #[test]
    fn test_known_unknowns_omitted_when_nothing_is_known() {
        let snapshot = sim_world()
            .with_system(SystemRecord::untyped(9, Some("Mystery".to_string())).with_parent(1, 2));
        let report = render(&snapshot, 4).unwrap();

        assert!(report.contains("<unknown system type>: 1"));
        assert!(section(&report, KNOWN_UNKNOWNS_HEADER).is_none());
        assert!(report.contains("    Mystery (formerly Unknown)\n"));
    }

    #[test]
    fn test_empty_world_has_no_update_hierarchy() {
        let report = render(&WorldSnapshot::new("Empty"), 4).unwrap();

        assert!(section(&report, COUNTS_HEADER).is_some());
        assert!(section(&report, UPDATE_HIERARCHY_HEADER).is_none());
    }

    #[test]
    fn test_world_without_roots_still_reports_counts() {
        let snapshot = WorldSnapshot::new("Loop")
            .with_type(group_type("G"))
            .with_system(SystemRecord::new(1, "G").with_parent(2, 0))
            .with_system(SystemRecord::new(2, "G").with_parent(1, 0));

        let report = render(&snapshot, 4).unwrap();

        assert_eq!(
            section(&report, COUNTS_HEADER).unwrap(),
            ["Group: 2", "Base (excluding group instances): 0", "Unmanaged: 0", "<unknown system type>: 0"]
        );
        assert!(section(&report, UPDATE_HIERARCHY_HEADER).is_none());
    }

    #[test]
    fn test_cycle_below_root_is_written_once() {
        let snapshot = WorldSnapshot::new("W")
            .with_type(group_type("Sim"))
            .with_type(group_type("A"))
            .with_type(group_type("B"))
            .with_system(SystemRecord::new(1, "Sim"))
            .with_system(SystemRecord::new(2, "A").with_parent(1, 0).with_parent(3, 0))
            .with_system(SystemRecord::new(3, "B").with_parent(2, 0));

        let report = render(&snapshot, 4).unwrap();

        assert_eq!(
            section(&report, UPDATE_HIERARCHY_HEADER).unwrap(),
            [
                "Sim (Group) | 1 children",
                "    A (Group) | 1 children | 2 parents",
                "        B (Group) | 1 children",
                "            A (Group) | 1 children | 2 parents",
            ]
        );
    }

    #[test]
    fn test_self_parented_system_below_root() {
        let snapshot = WorldSnapshot::new("W")
            .with_type(group_type("Sim"))
            .with_type(group_type("Echo"))
            .with_system(SystemRecord::new(1, "Sim"))
            .with_system(SystemRecord::new(2, "Echo").with_parent(1, 0).with_parent(2, 0));

        let report = render(&snapshot, 2).unwrap();

        assert_eq!(
            section(&report, UPDATE_HIERARCHY_HEADER).unwrap(),
            [
                "Sim (Group) | 1 children",
                "  Echo (Group) | 1 children | 2 parents",
                "    Echo (Group) | 1 children | 2 parents",
            ]
        );
    }

    #[test]
    fn test_empty_group_renders_zero_children() {
        let snapshot =
            WorldSnapshot::new("W").with_type(group_type("Idle")).with_system(SystemRecord::new(1, "Idle"));
        let report = render(&snapshot, 4).unwrap();

        assert_eq!(section(&report, UPDATE_HIERARCHY_HEADER).unwrap(), ["Idle (Group) | 0 children"]);
    }

    #[test]
    fn test_indentation_is_depth_times_spaces() {
        let snapshot = WorldSnapshot::new("Deep")
            .with_type(group_type("L0"))
            .with_type(group_type("L1"))
            .with_type(group_type("L2"))
            .with_type(SystemType::new("Leaf", [Capability::Unmanaged]))
            .with_system(SystemRecord::new(1, "L0"))
            .with_system(SystemRecord::new(2, "L1").with_parent(1, 0))
            .with_system(SystemRecord::new(3, "L2").with_parent(2, 0))
            .with_system(SystemRecord::new(4, "Leaf").with_parent(3, 0));

        for spaces in [0, 1, 2, 4, 7] {
            let report = render(&snapshot, spaces).unwrap();
            let lines = section(&report, UPDATE_HIERARCHY_HEADER).unwrap();

            assert_eq!(lines.len(), 4);
            for (depth, line) in lines.iter().enumerate() {
                let leading = line.len() - line.trim_start_matches(' ').len();
                assert_eq!(leading, depth * spaces, "depth {depth} with {spaces} spaces: {line:?}");
            }
        }
    }

    #[test]
    fn test_indent_wider_than_format_width_limit() {
        let spaces = 70_000;
        let report = render(&sim_world(), spaces).unwrap();
        let lines = section(&report, UPDATE_HIERARCHY_HEADER).unwrap();

        assert_eq!(lines[1].len(), spaces + "A (Base)".len());
        assert_eq!(lines[1].trim_start(), "A (Base)");
    }

    #[test]
    fn test_resolve_failure_aborts_report() {
        let snapshot = sim_world().with_system(SystemRecord::untyped(9, None).with_parent(1, 2));
        let hierarchy = Hierarchy::build(&snapshot, snapshot.discover()).unwrap();

        let err = ReportRenderer::default().render(&hierarchy).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Resolve { handle: SystemHandle(9), source: WorldError::SystemNotFound(_) }
        ));
    }
}
