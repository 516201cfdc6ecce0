//! The editable lab design document.
//!
//! A [`LabDesign`] is the in-memory document the topology designer mutates:
//! an ordered list of nodes, an ordered list of links between them, and a
//! display name. It lives entirely on the client for the duration of an
//! editing session and is persisted only as rendered topology YAML; the
//! JSON form here is the working-copy format the designer saves and
//! restores locally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TopoResult;

/// Canvas coordinate for a node. Presentation-only, never validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// One device in a lab design.
///
/// Only `id` is required; everything else is filled in as the designer edits
/// the node. Absent optional fields are omitted from the serialized topology
/// entirely, never emitted as null or empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignNode {
    /// Stable identifier, unique within a document. Becomes the topology
    /// node key after sanitization.
    pub id: String,

    /// Human-readable display name; the id doubles as the label when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Device or image family tag (free-form platform identifier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Container image reference in `repository:tag` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Explicit management address override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_ipv4: Option<String>,

    /// Environment variables for the node's container. Stored sorted so
    /// emission is deterministic; insertion order carries no meaning.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Canvas position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl DesignNode {
    /// Creates a node with the given id and no attributes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            kind: None,
            image: None,
            mgmt_ipv4: None,
            env: BTreeMap::new(),
            position: None,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the device kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the container image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the management IPv4 address override.
    #[must_use]
    pub fn with_mgmt_ipv4(mut self, addr: impl Into<String>) -> Self {
        self.mgmt_ipv4 = Some(addr.into());
        self
    }

    /// Adds one environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets the canvas position.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    /// The name shown on the canvas: the label if set, the id otherwise.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// A point-to-point link between two design nodes.
///
/// `source` and `target` reference node ids in the same document. A link
/// whose endpoints do not resolve is skipped (with a warning) at
/// serialization time rather than rejected here; the design is a best-effort
/// artifact while it is being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignLink {
    /// Caller-supplied link identifier, unique within the document.
    pub id: String,
    /// Node id of one endpoint.
    pub source: String,
    /// Node id of the other endpoint.
    pub target: String,
}

impl DesignLink {
    /// Creates a link between two node ids.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The design document: name, nodes, and links, all in input order.
///
/// Node and link order affects deterministic name/interface allocation in
/// the serializer but carries no other semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabDesign {
    /// Display name; sanitized into the topology document's name field.
    pub name: String,
    /// Ordered node list.
    #[serde(default)]
    pub nodes: Vec<DesignNode>,
    /// Ordered link list.
    #[serde(default)]
    pub links: Vec<DesignLink>,
}

impl LabDesign {
    /// Creates an empty design with the given display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Appends a node.
    pub fn add_node(&mut self, node: DesignNode) {
        self.nodes.push(node);
    }

    /// Appends a link.
    pub fn add_link(&mut self, link: DesignLink) {
        self.links.push(link);
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&DesignNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Looks up a node by id for editing.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut DesignNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Removes a node and every link that references it.
    ///
    /// Returns `true` if a node was removed.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.links.retain(|l| l.source != id && l.target != id);
        true
    }

    /// Removes a link by id. Returns `true` if a link was removed.
    pub fn remove_link(&mut self, id: &str) -> bool {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        self.links.len() != before
    }

    /// Clears all nodes and links, ending the editing session's content.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    /// Decodes a design from its JSON working-copy form.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::Json`](crate::error::TopoError) if the text is
    /// not a valid design document.
    pub fn from_json(text: &str) -> TopoResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encodes the design as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::Json`](crate::error::TopoError) if encoding
    /// fails; with this data model that does not happen in practice.
    pub fn to_json(&self) -> TopoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
