//! The dashboard snapshot shape.
//!
//! The server pushes the full dashboard state as one JSON blob; this module
//! is the single validating decode for it. Views read typed fields from
//! here instead of poking optionally-present keys out of raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full dashboard state as pushed over the snapshot stream.
///
/// Replaced wholesale on every `snapshot` event; there are no merge or
/// patch semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Server-side generation time of this snapshot.
    pub generated_at: DateTime<Utc>,
    /// Deployments known to the orchestrator.
    #[serde(default)]
    pub deployments: Vec<DeploymentSummary>,
    /// Lab nodes across all running deployments.
    #[serde(default)]
    pub nodes: Vec<NodeSummary>,
}

/// One deployment row on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    /// Deployment identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lifecycle state as reported by the server (free-form).
    pub state: String,
    /// Number of nodes in the deployment's topology.
    #[serde(default)]
    pub node_count: u32,
}

/// One lab node row on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    /// Node name within its deployment.
    pub name: String,
    /// Runtime status as reported by the server (free-form).
    pub status: String,
    /// Management address, empty when unassigned.
    #[serde(default)]
    pub mgmt_ip: String,
}
