//! # sysdump - Scheduling Hierarchy Diagnostics
//!
//! sysdump inspects the scheduling graph of a running world: a collection of
//! "system" units organized into nested groups that update in a defined
//! order. It produces a deterministic, human-readable report of the graph's
//! structure, statistics and anomalies.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      World Provider                             │
//! │          (JSON snapshot, or any `World` implementation)         │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ Discovery: units, static types, parents
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   sysdump (This Crate)                          │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐        │
//! │  │Classification│──▶│  Hierarchy   │──▶│    Report    │        │
//! │  │ (categories) │   │ (petgraph)   │   │  (renderer)  │        │
//! │  └──────────────┘   └──────────────┘   └──────┬───────┘        │
//! │                                               │                 │
//! │                                               ▼                 │
//! │                                       ┌──────────────┐         │
//! │                                       │   Resolver   │─── live │
//! │                                       │  (Unknowns)  │   world │
//! │                                       └──────────────┘         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`classification`]: Pure mapping from static type info to a category
//!   (Group, Base, Unmanaged, Unknown)
//! - [`hierarchy`]: The graph model. Nodes, parent/child edges in update
//!   order, roots, per-category counts and the multiple-parents query
//! - [`resolver`]: Live, handle-based type lookup for Unknown systems,
//!   performed at render time only
//! - [`report`]: The text report and its layout options
//! - [`world`]: The [`world::World`] trait, raw discovery records and the
//!   JSON snapshot provider
//! - [`domain`]: Newtypes and error types
//! - [`cli`]: Command-line argument parsing
//!
//! ## Typical Usage
//!
//! ```bash
//! # Print the report for a captured world
//! sysdump world.json
//!
//! # Two-space indentation, written to a file
//! sysdump world.json --indent 2 --output report.txt
//! ```
//!
//! ```
//! use sysdump::hierarchy::Hierarchy;
//! use sysdump::report::{ReportOptions, ReportRenderer};
//! use sysdump::world::WorldSnapshot;
//!
//! let snapshot = WorldSnapshot::from_json(r#"{
//!     "name": "TestWorld",
//!     "types": [{ "name": "Sim", "capabilities": ["group", "managed"] }],
//!     "systems": [{ "handle": 1, "type": "Sim", "runtime_type": "Sim" }]
//! }"#)?;
//!
//! let hierarchy = Hierarchy::build(&snapshot, snapshot.discover())?;
//! let report = ReportRenderer::new(ReportOptions::default()).render(&hierarchy)?;
//! assert!(report.contains("Sim (Group) | 0 children"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Key Concepts
//!
//! - **Group**: a system that contains and orders child systems
//! - **Base / Unmanaged**: leaf systems, split by execution model
//! - **Unknown**: a system whose category could not be determined statically
//! - **Handle**: opaque world-scoped reference, used for live lookups
//! - **Known Unknowns**: partial explanations for why some systems are Unknown

pub mod classification;
pub mod cli;
pub mod domain;
pub mod hierarchy;
pub mod report;
pub mod resolver;
pub mod world;
