//! Design document to topology YAML serialization.
//!
//! [`design_to_topology_yaml`] derives a fresh topology document from a
//! [`LabDesign`] on every call — pull-based, nothing is incrementally
//! maintained. It cannot fail: structural problems (missing images, dirty
//! identifiers, dangling links) are collected as [`TopologyWarning`] values
//! alongside a still-valid document, and the caller decides what to surface.

use std::fmt;

use tracing::debug;

use crate::design::LabDesign;
use crate::naming::{InterfaceAllocator, assign_unique_names, sanitize_identifier_or};
use crate::yaml::{YamlValue, render};

/// Fallback document name when the design name sanitizes to nothing.
const FALLBACK_LAB_NAME: &str = "lab";

/// Advisory findings produced while serializing a design.
///
/// Warnings never block serialization; a deploy with warnings is still a
/// deploy. `Display` renders the message shown inline in the designer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyWarning {
    /// A node has no container image configured.
    MissingImage {
        /// Final topology name of the node.
        node: String,
    },
    /// A node's identifier was cleaned up to form its topology name.
    NameSanitized {
        /// The identifier as entered in the design.
        original: String,
        /// The sanitized name that will be used.
        chosen: String,
    },
    /// A node's sanitized name collided with an earlier node and was
    /// suffixed to stay unique.
    NameCollision {
        /// The identifier as entered in the design.
        original: String,
        /// The suffixed name that will be used.
        chosen: String,
    },
    /// A link references at least one node id that does not exist in the
    /// design; the link was omitted from the document.
    MissingEndpoint {
        /// Id of the skipped link.
        link: String,
    },
}

impl fmt::Display for TopologyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingImage { node } => write!(f, "Node {node}: missing image"),
            Self::NameSanitized { original, chosen } => {
                write!(f, "Node \"{original}\": name will be \"{chosen}\"")
            }
            Self::NameCollision { original, chosen } => {
                write!(f, "Node \"{original}\": name adjusted to \"{chosen}\"")
            }
            Self::MissingEndpoint { link } => write!(f, "Link {link}: missing endpoint(s)"),
        }
    }
}

/// Result of serializing a design: the rendered document plus advisories.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyOutput {
    /// The topology document text, ending in exactly one newline.
    pub yaml: String,
    /// Advisory warnings, in node order then link order.
    pub warnings: Vec<TopologyWarning>,
}

/// Serializes a design into topology YAML text.
///
/// The emitted structure is `{ name, topology: { nodes, links } }` with the
/// `links` key omitted entirely when no link resolved. Node records carry
/// only present, non-empty fields in the fixed order `kind`, `image`,
/// `env`, `mgmt_ipv4`. Output is deterministic for a given input order.
///
/// # Examples
///
/// ```
/// use forge_topo::{DesignLink, DesignNode, LabDesign, design_to_topology_yaml};
///
/// let mut design = LabDesign::new("demo");
/// design.add_node(DesignNode::new("a").with_image("alpine:3"));
/// design.add_node(DesignNode::new("b").with_image("alpine:3"));
/// design.add_link(DesignLink::new("l1", "a", "b"));
///
/// let output = design_to_topology_yaml(&design);
/// assert!(output.warnings.is_empty());
/// assert!(output.yaml.contains("endpoints: [\"a:eth1\", \"b:eth1\"]"));
/// ```
#[must_use]
pub fn design_to_topology_yaml(design: &LabDesign) -> TopologyOutput {
    let mut warnings = Vec::new();

    let lab_name = sanitize_identifier_or(&design.name, FALLBACK_LAB_NAME);
    let names = assign_unique_names(&design.nodes);

    let mut node_entries: Vec<(String, YamlValue)> = Vec::with_capacity(design.nodes.len());
    for (node, assignment) in design.nodes.iter().zip(names.assignments()) {
        if assignment.base != node.id {
            warnings.push(TopologyWarning::NameSanitized {
                original: node.id.clone(),
                chosen: assignment.base.clone(),
            });
        }
        if assignment.final_name != assignment.base {
            warnings.push(TopologyWarning::NameCollision {
                original: node.id.clone(),
                chosen: assignment.final_name.clone(),
            });
        }

        let mut record: Vec<(String, YamlValue)> = Vec::new();
        if let Some(kind) = non_empty(node.kind.as_deref()) {
            record.push(("kind".to_owned(), YamlValue::string(kind)));
        }
        match non_empty(node.image.as_deref()) {
            Some(image) => record.push(("image".to_owned(), YamlValue::string(image))),
            None => warnings.push(TopologyWarning::MissingImage {
                node: assignment.final_name.clone(),
            }),
        }
        if !node.env.is_empty() {
            let env = node
                .env
                .iter()
                .map(|(key, value)| (key.clone(), YamlValue::string(value.clone())))
                .collect();
            record.push(("env".to_owned(), YamlValue::Mapping(env)));
        }
        if let Some(addr) = non_empty(node.mgmt_ipv4.as_deref()) {
            record.push(("mgmt_ipv4".to_owned(), YamlValue::string(addr)));
        }

        node_entries.push((assignment.final_name.clone(), YamlValue::Mapping(record)));
    }

    let mut interfaces = InterfaceAllocator::new();
    let mut link_items: Vec<YamlValue> = Vec::new();
    for link in &design.links {
        let (Some(source), Some(target)) = (names.resolve(&link.source), names.resolve(&link.target))
        else {
            warnings.push(TopologyWarning::MissingEndpoint {
                link: link.id.clone(),
            });
            continue;
        };
        let source = source.to_owned();
        let target = target.to_owned();
        let source_iface = interfaces.next(&source);
        let target_iface = interfaces.next(&target);
        link_items.push(YamlValue::Mapping(vec![(
            "endpoints".to_owned(),
            YamlValue::Sequence(vec![
                YamlValue::String(format!("{source}:{source_iface}")),
                YamlValue::String(format!("{target}:{target_iface}")),
            ]),
        )]));
    }

    let link_count = link_items.len();
    let mut topology: Vec<(String, YamlValue)> =
        vec![("nodes".to_owned(), YamlValue::Mapping(node_entries))];
    if !link_items.is_empty() {
        topology.push(("links".to_owned(), YamlValue::Sequence(link_items)));
    }

    let document = YamlValue::Mapping(vec![
        ("name".to_owned(), YamlValue::String(lab_name)),
        ("topology".to_owned(), YamlValue::Mapping(topology)),
    ]);

    let yaml = render(&document);
    debug!(
        nodes = design.nodes.len(),
        links = link_count,
        warnings = warnings.len(),
        "serialized design to topology yaml"
    );

    TopologyOutput { yaml, warnings }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{DesignLink, DesignNode};

    fn warning_strings(output: &TopologyOutput) -> Vec<String> {
        output.warnings.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_design_still_renders_a_document() {
        let output = design_to_topology_yaml(&LabDesign::default());
        assert_eq!(output.yaml, "name: \"lab\"\ntopology:\n  nodes: {}\n");
        assert!(output.yaml.ends_with('\n'));
        assert!(!output.yaml.ends_with("\n\n"));
    }

    #[test]
    fn node_fields_emit_in_fixed_order() {
        let mut design = LabDesign::new("ordered");
        design.add_node(
            DesignNode::new("r1")
                .with_kind("linux")
                .with_image("alpine:3")
                .with_env("MODE", "lab")
                .with_mgmt_ipv4("172.20.20.2"),
        );

        let output = design_to_topology_yaml(&design);
        let expected = "name: \"ordered\"\n\
                        topology:\n\
                        \x20 nodes:\n\
                        \x20   r1:\n\
                        \x20     kind: \"linux\"\n\
                        \x20     image: \"alpine:3\"\n\
                        \x20     env:\n\
                        \x20       MODE: \"lab\"\n\
                        \x20     mgmt_ipv4: \"172.20.20.2\"\n";
        assert_eq!(output.yaml, expected);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn absent_fields_are_omitted_not_nulled() {
        let mut design = LabDesign::new("sparse");
        design.add_node(DesignNode::new("r1").with_image("alpine:3"));

        let output = design_to_topology_yaml(&design);
        assert!(!output.yaml.contains("kind"));
        assert!(!output.yaml.contains("env"));
        assert!(!output.yaml.contains("mgmt_ipv4"));
        assert!(!output.yaml.contains("null"));
    }

    #[test]
    fn empty_string_fields_count_as_absent() {
        let mut design = LabDesign::new("blank");
        design.add_node(DesignNode::new("r1").with_kind("").with_image(""));

        let output = design_to_topology_yaml(&design);
        assert!(!output.yaml.contains("kind"));
        assert!(
            output
                .warnings
                .contains(&TopologyWarning::MissingImage { node: "r1".to_owned() })
        );
    }

    #[test]
    fn positions_never_reach_the_document() {
        let mut design = LabDesign::new("placed");
        design.add_node(DesignNode::new("r1").with_image("alpine:3").with_position(10.0, 20.0));

        let output = design_to_topology_yaml(&design);
        assert!(!output.yaml.contains("position"));
        assert!(!output.yaml.contains("10"));
    }

    #[test]
    fn scenario_demo_lab_sanitizes_and_suffixes() {
        let mut design = LabDesign::new("Demo Lab!");
        design.add_node(DesignNode::new("R1").with_kind("linux").with_image("alpine:3"));
        design.add_node(DesignNode::new("r1"));

        let output = design_to_topology_yaml(&design);
        assert!(output.yaml.starts_with("name: \"demo-lab\"\n"));
        assert!(output.yaml.contains("    r1:\n"));
        assert!(output.yaml.contains("    r1-2: {}\n"));

        let messages = warning_strings(&output);
        assert!(messages.contains(&"Node \"R1\": name will be \"r1\"".to_owned()));
        assert!(messages.contains(&"Node \"r1\": name adjusted to \"r1-2\"".to_owned()));
        assert!(messages.contains(&"Node r1-2: missing image".to_owned()));
    }

    #[test]
    fn scenario_single_link_allocates_eth1_on_both_ends() {
        let mut design = LabDesign::new("pair");
        design.add_node(DesignNode::new("a").with_image("alpine:3"));
        design.add_node(DesignNode::new("b").with_image("alpine:3"));
        design.add_link(DesignLink::new("l1", "a", "b"));

        let output = design_to_topology_yaml(&design);
        assert!(output.warnings.is_empty());
        assert!(output.yaml.contains("  links:\n    - endpoints: [\"a:eth1\", \"b:eth1\"]\n"));
    }

    #[test]
    fn interfaces_count_up_in_link_order() {
        let mut design = LabDesign::new("fanout");
        for id in ["hub", "s1", "s2", "s3"] {
            design.add_node(DesignNode::new(id).with_image("alpine:3"));
        }
        design.add_link(DesignLink::new("l1", "hub", "s1"));
        design.add_link(DesignLink::new("l2", "hub", "s2"));
        design.add_link(DesignLink::new("l3", "hub", "s3"));

        let output = design_to_topology_yaml(&design);
        assert!(output.yaml.contains("[\"hub:eth1\", \"s1:eth1\"]"));
        assert!(output.yaml.contains("[\"hub:eth2\", \"s2:eth1\"]"));
        assert!(output.yaml.contains("[\"hub:eth3\", \"s3:eth1\"]"));
    }

    #[test]
    fn unresolved_link_is_skipped_with_one_warning() {
        let mut design = LabDesign::new("dangling");
        design.add_node(DesignNode::new("a").with_image("alpine:3"));
        design.add_link(DesignLink::new("bad", "a", "ghost"));

        let output = design_to_topology_yaml(&design);
        assert!(!output.yaml.contains("links"));
        assert!(!output.yaml.contains("ghost"));
        let missing: Vec<_> = output
            .warnings
            .iter()
            .filter(|w| matches!(w, TopologyWarning::MissingEndpoint { .. }))
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(
            missing[0].to_string(),
            "Link bad: missing endpoint(s)"
        );
    }

    #[test]
    fn skipped_link_does_not_consume_interfaces() {
        let mut design = LabDesign::new("holes");
        design.add_node(DesignNode::new("a").with_image("alpine:3"));
        design.add_node(DesignNode::new("b").with_image("alpine:3"));
        design.add_link(DesignLink::new("bad", "a", "ghost"));
        design.add_link(DesignLink::new("good", "a", "b"));

        let output = design_to_topology_yaml(&design);
        // the dangling link must not have burned a:eth1
        assert!(output.yaml.contains("[\"a:eth1\", \"b:eth1\"]"));
    }

    #[test]
    fn self_link_gets_two_distinct_interfaces() {
        let mut design = LabDesign::new("loop");
        design.add_node(DesignNode::new("a").with_image("alpine:3"));
        design.add_link(DesignLink::new("l1", "a", "a"));

        let output = design_to_topology_yaml(&design);
        assert!(output.yaml.contains("[\"a:eth1\", \"a:eth2\"]"));
    }

    #[test]
    fn links_key_omitted_when_nothing_resolved() {
        let mut design = LabDesign::new("lonely");
        design.add_node(DesignNode::new("a").with_image("alpine:3"));

        let output = design_to_topology_yaml(&design);
        assert!(!output.yaml.contains("links"));
    }

    #[test]
    fn serialization_is_deterministic() {
        let mut design = LabDesign::new("repeat");
        design.add_node(DesignNode::new("a").with_image("alpine:3").with_env("B", "2").with_env("A", "1"));
        design.add_node(DesignNode::new("b").with_image("alpine:3"));
        design.add_link(DesignLink::new("l1", "a", "b"));

        let first = design_to_topology_yaml(&design);
        let second = design_to_topology_yaml(&design);
        assert_eq!(first, second);
        // env keys come out sorted regardless of insertion order
        let a_pos = first.yaml.find("A: \"1\"");
        let b_pos = first.yaml.find("B: \"2\"");
        assert!(a_pos < b_pos);
    }

    #[test]
    fn warning_messages_render_for_display() {
        let warning = TopologyWarning::MissingImage { node: "r1".to_owned() };
        assert_eq!(warning.to_string(), "Node r1: missing image");
    }
}
