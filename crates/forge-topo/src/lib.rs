//! # forge-topo
//!
//! Lab design document model and topology transforms for Skyforge.
//!
//! The visual lab designer edits a [`LabDesign`] — an ordered set of nodes
//! and links plus canvas metadata. This crate owns that model and its two
//! inverse transforms:
//!
//! - **Serialize**: [`design_to_topology_yaml`] derives a deterministic
//!   containerlab-style topology document from a design, with collision-free
//!   node names, per-node `eth1..ethN` interface allocation, and advisory
//!   warnings instead of errors.
//! - **Parse**: [`parse_topology_graph`] reads a saved topology document
//!   back into a reduced node/edge graph for visualization, tolerating
//!   anything but syntactically broken YAML.
//!
//! ## Example
//!
//! ```rust
//! use forge_topo::{DesignLink, DesignNode, LabDesign, design_to_topology_yaml};
//!
//! let mut design = LabDesign::new("Demo Lab");
//! design.add_node(DesignNode::new("r1").with_kind("linux").with_image("alpine:3"));
//! design.add_node(DesignNode::new("r2").with_kind("linux").with_image("alpine:3"));
//! design.add_link(DesignLink::new("l1", "r1", "r2"));
//!
//! let output = design_to_topology_yaml(&design);
//! assert!(output.warnings.is_empty());
//! assert!(output.yaml.starts_with("name: \"demo-lab\"\n"));
//! ```
//!
//! ## Modules
//!
//! - [`design`]: the editable design document (nodes, links, positions)
//! - [`naming`]: identifier sanitization and unique-name/interface allocation
//! - [`yaml`]: the self-contained topology YAML emitter
//! - [`serializer`]: design → topology document
//! - [`parser`]: topology document → reduced graph
//! - [`error`]: error types and results

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod design;
pub mod error;
pub mod naming;
pub mod parser;
pub mod serializer;
pub mod yaml;

// Re-export main types for convenience
pub use design::{DesignLink, DesignNode, LabDesign, Position};
pub use error::{TopoError, TopoResult};
pub use naming::{
    InterfaceAllocator, NameAssignment, NameMap, assign_unique_names, sanitize_identifier,
    sanitize_identifier_or,
};
pub use parser::{ReducedEdge, ReducedGraph, ReducedNode, parse_topology_graph};
pub use serializer::{TopologyOutput, TopologyWarning, design_to_topology_yaml};
pub use yaml::{YamlValue, render};
