//! Identifier sanitization and collision-free name allocation.
//!
//! Topology node keys must be clean lowercase identifiers and unique within a
//! document. This module derives them deterministically from whatever the
//! designer typed: [`sanitize_identifier`] normalizes a single string,
//! [`assign_unique_names`] maps a whole node list to distinct final names,
//! and [`InterfaceAllocator`] hands out `eth1..ethN` per node during one
//! serialization pass.

use std::collections::{HashMap, HashSet};

use crate::design::DesignNode;

/// Maximum length of a sanitized identifier.
pub const MAX_IDENTIFIER_LENGTH: usize = 48;

/// Identifier used when sanitization leaves nothing behind.
pub const FALLBACK_IDENTIFIER: &str = "node";

/// Sanitizes an arbitrary string into a topology-safe identifier.
///
/// Lowercases the input, collapses every maximal run of characters outside
/// `[a-z0-9-]` into a single `-`, strips leading/trailing dashes, and caps
/// the result at [`MAX_IDENTIFIER_LENGTH`] characters. An input that
/// sanitizes to nothing yields [`FALLBACK_IDENTIFIER`].
///
/// This function is total and idempotent.
///
/// # Examples
///
/// ```
/// use forge_topo::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("Core Router #1"), "core-router-1");
/// assert_eq!(sanitize_identifier("!!!"), "node");
/// ```
#[must_use]
pub fn sanitize_identifier(raw: &str) -> String {
    sanitize_identifier_or(raw, FALLBACK_IDENTIFIER)
}

/// Sanitizes `raw`, substituting `fallback` when nothing survives.
///
/// The document-name path uses this with `"lab"`; everything else goes
/// through [`sanitize_identifier`].
#[must_use]
pub fn sanitize_identifier_or(raw: &str, fallback: &str) -> String {
    let cleaned = sanitize_core(raw);
    if cleaned.is_empty() {
        fallback.to_owned()
    } else {
        cleaned
    }
}

/// The sanitization pass without the non-empty fallback.
fn sanitize_core(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len().min(MAX_IDENTIFIER_LENGTH));
    let mut in_run = false;
    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push('-');
            in_run = true;
        }
    }
    let mut cleaned = out.trim_matches('-').to_owned();
    cleaned.truncate(MAX_IDENTIFIER_LENGTH);
    // truncation must not reintroduce a trailing dash
    while cleaned.ends_with('-') {
        cleaned.pop();
    }
    cleaned
}

/// One node's resolved naming: the original id, the sanitized base, and the
/// final (collision-suffixed) topology key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAssignment {
    /// The node id as it appears in the design document.
    pub original: String,
    /// Sanitized base name, before any uniqueness suffix.
    pub base: String,
    /// The unique name the node gets in the emitted topology.
    pub final_name: String,
}

/// Ordered mapping from original node ids to unique topology names.
///
/// Produced by [`assign_unique_names`]; one entry per input node, in input
/// order, with pairwise-distinct `final_name` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    assignments: Vec<NameAssignment>,
}

impl NameMap {
    /// Resolves an original node id to its final topology name.
    ///
    /// If the design somehow contains duplicate ids, the first assignment
    /// wins; ids are unique in any document the editor produces.
    #[must_use]
    pub fn resolve(&self, original_id: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.original == original_id)
            .map(|a| a.final_name.as_str())
    }

    /// All assignments, in input node order.
    #[must_use]
    pub fn assignments(&self) -> &[NameAssignment] {
        &self.assignments
    }

    /// Number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Assigns a unique sanitized name to every node, in input order.
///
/// The base name comes from the node id, falling back to the label, falling
/// back to [`FALLBACK_IDENTIFIER`]. A base already taken by an earlier node
/// gets the lowest unused `-2`, `-3`, ... suffix. Every input node receives
/// exactly one final name; the function is pure and emits no diagnostics —
/// callers derive their own warnings from the assignments.
#[must_use]
pub fn assign_unique_names(nodes: &[DesignNode]) -> NameMap {
    let mut used: HashSet<String> = HashSet::with_capacity(nodes.len());
    let mut assignments = Vec::with_capacity(nodes.len());

    for node in nodes {
        let base = base_name(node);
        let final_name = if used.contains(&base) {
            let mut suffix = 2u32;
            loop {
                let candidate = format!("{base}-{suffix}");
                if !used.contains(&candidate) {
                    break candidate;
                }
                suffix += 1;
            }
        } else {
            base.clone()
        };
        used.insert(final_name.clone());
        assignments.push(NameAssignment {
            original: node.id.clone(),
            base,
            final_name,
        });
    }

    NameMap { assignments }
}

fn base_name(node: &DesignNode) -> String {
    let from_id = sanitize_core(&node.id);
    if !from_id.is_empty() {
        return from_id;
    }
    if let Some(label) = &node.label {
        let from_label = sanitize_core(label);
        if !from_label.is_empty() {
            return from_label;
        }
    }
    FALLBACK_IDENTIFIER.to_owned()
}

/// Per-node interface numbering for one serialization pass.
///
/// Each node has an independent counter; the first call for a node yields
/// `eth1`, the next `eth2`, and so on. Allocators are cheap and are never
/// reused across serialization passes.
#[derive(Debug, Default)]
pub struct InterfaceAllocator {
    counters: HashMap<String, u32>,
}

impl InterfaceAllocator {
    /// Creates an allocator with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next interface name for `node`.
    pub fn next(&mut self, node: &str) -> String {
        let counter = self.counters.entry(node.to_owned()).or_insert(0);
        *counter += 1;
        format!("eth{counter}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn node(id: &str) -> DesignNode {
        DesignNode::new(id)
    }

    mod sanitize_tests {
        use super::*;

        #[test]
        fn lowercases_and_collapses_runs() {
            assert_eq!(sanitize_identifier("Core Router #1"), "core-router-1");
            assert_eq!(sanitize_identifier("R1"), "r1");
            assert_eq!(sanitize_identifier("a___b"), "a-b");
        }

        #[test]
        fn strips_leading_and_trailing_dashes() {
            assert_eq!(sanitize_identifier("--edge--"), "edge");
            assert_eq!(sanitize_identifier("!spine!"), "spine");
        }

        #[test]
        fn preserves_existing_dashes() {
            assert_eq!(sanitize_identifier("leaf-01"), "leaf-01");
            assert_eq!(sanitize_identifier("a--b"), "a--b");
        }

        #[test]
        fn empty_input_falls_back() {
            assert_eq!(sanitize_identifier(""), "node");
            assert_eq!(sanitize_identifier("!!!"), "node");
            assert_eq!(sanitize_identifier("---"), "node");
        }

        #[test]
        fn custom_fallback_for_document_names() {
            assert_eq!(sanitize_identifier_or("", "lab"), "lab");
            assert_eq!(sanitize_identifier_or("Demo Lab!", "lab"), "demo-lab");
        }

        #[test]
        fn truncates_to_max_length() {
            let long = "x".repeat(200);
            let cleaned = sanitize_identifier(&long);
            assert_eq!(cleaned.len(), MAX_IDENTIFIER_LENGTH);
        }

        #[test]
        fn truncation_never_leaves_trailing_dash() {
            // 47 chars then a separator right at the cut point
            let tricky = format!("{}-{}", "a".repeat(47), "b".repeat(20));
            let cleaned = sanitize_identifier(&tricky);
            assert!(!cleaned.ends_with('-'));
            assert!(cleaned.len() <= MAX_IDENTIFIER_LENGTH);
        }

        #[test]
        fn unicode_collapses_to_single_dash() {
            assert_eq!(sanitize_identifier("café ☕ corner"), "caf-corner");
        }

        proptest! {
            #[test]
            fn sanitize_is_idempotent(s in ".*") {
                let once = sanitize_identifier(&s);
                prop_assert_eq!(sanitize_identifier(&once), once.clone());
            }

            #[test]
            fn sanitize_is_never_empty(s in ".*") {
                prop_assert!(!sanitize_identifier(&s).is_empty());
            }

            #[test]
            fn sanitize_output_is_clean(s in ".*") {
                let cleaned = sanitize_identifier(&s);
                prop_assert!(cleaned.len() <= MAX_IDENTIFIER_LENGTH);
                prop_assert!(cleaned
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
                prop_assert!(!cleaned.starts_with('-'));
                prop_assert!(!cleaned.ends_with('-'));
            }
        }
    }

    mod assign_tests {
        use super::*;

        #[test]
        fn clean_names_pass_through() {
            let nodes = [node("a"), node("b")];
            let map = assign_unique_names(&nodes);
            assert_eq!(map.resolve("a"), Some("a"));
            assert_eq!(map.resolve("b"), Some("b"));
        }

        #[test]
        fn collisions_get_numeric_suffixes() {
            let nodes = [node("R1"), node("r1"), node("r-1")];
            let map = assign_unique_names(&nodes);
            assert_eq!(map.resolve("R1"), Some("r1"));
            assert_eq!(map.resolve("r1"), Some("r1-2"));
            // "r-1" sanitizes to itself, no collision
            assert_eq!(map.resolve("r-1"), Some("r-1"));
        }

        #[test]
        fn suffix_takes_lowest_unused_integer() {
            let nodes = [node("a-2"), node("a"), node("a!")];
            let map = assign_unique_names(&nodes);
            assert_eq!(map.resolve("a-2"), Some("a-2"));
            assert_eq!(map.resolve("a"), Some("a"));
            // base "a" is taken, "a-2" is taken, so the next free slot is "a-3"
            assert_eq!(map.resolve("a!"), Some("a-3"));
        }

        #[test]
        fn empty_id_falls_back_to_label_then_default() {
            let mut labeled = node("!!");
            labeled.label = Some("Spine Switch".to_owned());
            let nodes = [labeled, node("??")];
            let map = assign_unique_names(&nodes);
            assert_eq!(map.resolve("!!"), Some("spine-switch"));
            assert_eq!(map.resolve("??"), Some("node"));
        }

        #[test]
        fn mapping_is_total_over_duplicates() {
            let nodes = [node("x"), node("x"), node("x")];
            let map = assign_unique_names(&nodes);
            assert_eq!(map.len(), 3);
            let finals: Vec<_> = map
                .assignments()
                .iter()
                .map(|a| a.final_name.clone())
                .collect();
            assert_eq!(finals, ["x", "x-2", "x-3"]);
        }

        proptest! {
            #[test]
            fn final_names_are_pairwise_distinct(ids in proptest::collection::vec(".*", 0..16)) {
                let nodes: Vec<DesignNode> = ids.iter().map(|id| DesignNode::new(id.clone())).collect();
                let map = assign_unique_names(&nodes);
                prop_assert_eq!(map.len(), nodes.len());
                let mut seen = std::collections::HashSet::new();
                for assignment in map.assignments() {
                    prop_assert!(seen.insert(assignment.final_name.clone()));
                }
            }
        }
    }

    mod interface_tests {
        use super::*;

        #[test]
        fn counters_start_at_eth1() {
            let mut alloc = InterfaceAllocator::new();
            assert_eq!(alloc.next("a"), "eth1");
            assert_eq!(alloc.next("a"), "eth2");
            assert_eq!(alloc.next("a"), "eth3");
        }

        #[test]
        fn counters_are_independent_per_node() {
            let mut alloc = InterfaceAllocator::new();
            assert_eq!(alloc.next("a"), "eth1");
            assert_eq!(alloc.next("b"), "eth1");
            assert_eq!(alloc.next("a"), "eth2");
            assert_eq!(alloc.next("b"), "eth2");
        }
    }
}
