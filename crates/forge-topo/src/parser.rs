//! Topology document to reduced graph parsing.
//!
//! The inverse of the serializer, used when importing or visualizing a
//! previously saved document. The output is intentionally lossy — no
//! images, env, or positions — because its only consumer is the graph
//! canvas, not the editor. Syntactically broken YAML is the single hard
//! failure; everything structural degrades to empty collections.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use crate::error::TopoResult;

/// A node as rendered on the import/visualization canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducedNode {
    /// Topology node key.
    pub id: String,
    /// Display label; same as the key for parsed documents.
    pub label: String,
    /// Device kind, empty when the document does not declare one.
    pub kind: String,
    /// Placeholder status until live state arrives.
    pub status: String,
    /// Management address; unknown at parse time.
    pub mgmt_ip: String,
}

/// An edge as rendered on the import/visualization canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducedEdge {
    /// Positional edge id (`e1`, `e2`, ... by input index).
    pub id: String,
    /// Node id parsed from the first endpoint string.
    pub source: String,
    /// Node id parsed from the second endpoint string.
    pub target: String,
    /// Display label: the raw endpoint pair.
    pub label: String,
}

/// The visualization-only graph produced from a topology document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducedGraph {
    /// Nodes in document order.
    pub nodes: Vec<ReducedNode>,
    /// Edges in document order.
    pub edges: Vec<ReducedEdge>,
}

/// Status assigned to every parsed node until live state is known.
const UNKNOWN_STATUS: &str = "unknown";

/// Parses topology YAML text into a reduced graph.
///
/// Missing or wrongly-typed `topology`, `nodes`, or `links` sections yield
/// empty collections; malformed individual link entries are skipped
/// silently. An edge's endpoint node ids are taken at face value — they
/// are not checked against the declared node map, so a partially-specified
/// fragment still renders.
///
/// # Errors
///
/// Returns [`TopoError::Yaml`](crate::error::TopoError) only when the text
/// is not syntactically valid YAML.
pub fn parse_topology_graph(yaml_text: &str) -> TopoResult<ReducedGraph> {
    let document: Value = serde_yaml::from_str(yaml_text)?;
    let mut graph = ReducedGraph::default();

    let Some(topology) = document.get("topology") else {
        debug!("document has no topology section");
        return Ok(graph);
    };

    if let Some(nodes) = topology.get("nodes").and_then(Value::as_mapping) {
        for (key, entry) in nodes {
            let Some(id) = key.as_str() else { continue };
            let kind = entry
                .get("kind")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            graph.nodes.push(ReducedNode {
                id: id.to_owned(),
                label: id.to_owned(),
                kind,
                status: UNKNOWN_STATUS.to_owned(),
                mgmt_ip: String::new(),
            });
        }
    }

    if let Some(links) = topology.get("links").and_then(Value::as_sequence) {
        for (index, entry) in links.iter().enumerate() {
            let Some(endpoints) = entry.get("endpoints").and_then(Value::as_sequence) else {
                continue;
            };
            if endpoints.len() != 2 {
                continue;
            }
            let (Some(first), Some(second)) = (endpoints[0].as_str(), endpoints[1].as_str())
            else {
                continue;
            };
            let source = endpoint_node(first);
            let target = endpoint_node(second);
            if source.is_empty() || target.is_empty() {
                continue;
            }
            graph.edges.push(ReducedEdge {
                id: format!("e{}", index + 1),
                source: source.to_owned(),
                target: target.to_owned(),
                label: format!("{first} ↔ {second}"),
            });
        }
    }

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "parsed topology document"
    );
    Ok(graph)
}

/// The owning node id of an endpoint string: everything before the first
/// `:`, or the whole string when there is no interface part.
fn endpoint_node(endpoint: &str) -> &str {
    endpoint.split_once(':').map_or(endpoint, |(node, _)| node)
}
