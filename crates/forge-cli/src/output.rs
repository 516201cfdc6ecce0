//! Output rendering for graphs and warning lists.

use std::io::{self, Write};

use forge_topo::{ReducedGraph, TopologyWarning};

use crate::cli::Format;

/// Writes a reduced graph in the selected format.
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_graph(out: &mut impl Write, format: Format, graph: &ReducedGraph) -> io::Result<()> {
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(graph)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(out, "{json}")
        }
        Format::Table => {
            writeln!(out, "NODES ({})", graph.nodes.len())?;
            writeln!(out, "{:<24} {:<16} {:<10}", "ID", "KIND", "STATUS")?;
            for node in &graph.nodes {
                let kind = if node.kind.is_empty() { "-" } else { node.kind.as_str() };
                writeln!(out, "{:<24} {:<16} {:<10}", node.id, kind, node.status)?;
            }
            writeln!(out)?;
            writeln!(out, "EDGES ({})", graph.edges.len())?;
            writeln!(out, "{:<6} {:<24} {:<24}", "ID", "SOURCE", "TARGET")?;
            for edge in &graph.edges {
                writeln!(out, "{:<6} {:<24} {:<24}", edge.id, edge.source, edge.target)?;
            }
            Ok(())
        }
    }
}

/// Writes serialization warnings in the selected format.
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_warnings(
    out: &mut impl Write,
    format: Format,
    warnings: &[TopologyWarning],
) -> io::Result<()> {
    match format {
        Format::Json => {
            let messages: Vec<String> = warnings.iter().map(ToString::to_string).collect();
            let json = serde_json::to_string_pretty(&messages)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(out, "{json}")
        }
        Format::Table => {
            if warnings.is_empty() {
                writeln!(out, "No warnings.")
            } else {
                for warning in warnings {
                    writeln!(out, "warning: {warning}")?;
                }
                writeln!(out, "{} warning(s)", warnings.len())
            }
        }
    }
}
