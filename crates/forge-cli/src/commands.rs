//! Command implementations.
//!
//! Each command is a text-in/text-out function over `Write` sinks so tests
//! drive them without touching the filesystem; `main` wires in the real
//! files and stdout.

use std::io::Write;

use forge_topo::{LabDesign, design_to_topology_yaml, parse_topology_graph};
use tracing::debug;

use crate::cli::Format;
use crate::error::CliError;
use crate::output::{write_graph, write_warnings};

/// Renders a design document to topology YAML.
///
/// The YAML goes to `out`; warnings go to `warn_out` so redirecting the
/// document keeps advisories visible on the terminal.
///
/// # Errors
///
/// Fails only on broken design JSON or I/O; warnings never fail a render.
pub fn render(
    design_json: &str,
    format: Format,
    out: &mut impl Write,
    warn_out: &mut impl Write,
) -> Result<(), CliError> {
    let design = LabDesign::from_json(design_json)?;
    let output = design_to_topology_yaml(&design);
    debug!(warnings = output.warnings.len(), "rendered design");

    out.write_all(output.yaml.as_bytes())?;
    if !output.warnings.is_empty() {
        write_warnings(warn_out, format, &output.warnings)?;
    }
    Ok(())
}

/// Parses a topology document and prints its reduced graph.
///
/// # Errors
///
/// Fails on syntactically invalid YAML or I/O. A document that parses but
/// declares nothing prints an empty graph — that is not an error.
pub fn graph(topology_yaml: &str, format: Format, out: &mut impl Write) -> Result<(), CliError> {
    let graph = parse_topology_graph(topology_yaml)?;
    write_graph(out, format, &graph)?;
    Ok(())
}

/// Renders a design and reports only its warnings.
///
/// # Errors
///
/// Fails only on broken design JSON or I/O; a design with warnings still
/// checks out (warnings are advisory).
pub fn check(design_json: &str, format: Format, out: &mut impl Write) -> Result<(), CliError> {
    let design = LabDesign::from_json(design_json)?;
    let output = design_to_topology_yaml(&design);
    write_warnings(out, format, &output.warnings)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESIGN: &str = r#"{
        "name": "Demo Lab!",
        "nodes": [
            {"id": "R1", "kind": "linux", "image": "alpine:3"},
            {"id": "r1"}
        ],
        "links": []
    }"#;

    #[test]
    fn render_emits_yaml_and_warnings_separately() {
        let mut out = Vec::new();
        let mut warn = Vec::new();
        let result = render(DESIGN, Format::Table, &mut out, &mut warn);
        assert!(result.is_ok());

        let yaml = String::from_utf8_lossy(&out);
        assert!(yaml.starts_with("name: \"demo-lab\"\n"));
        assert!(yaml.contains("r1-2"));
        // the document stream stays clean
        assert!(!yaml.contains("warning"));

        let warnings = String::from_utf8_lossy(&warn);
        assert!(warnings.contains("Node r1-2: missing image"));
    }

    #[test]
    fn render_rejects_broken_design_json() {
        let mut out = Vec::new();
        let mut warn = Vec::new();
        let result = render("{broken", Format::Table, &mut out, &mut warn);
        assert!(result.is_err());
    }

    #[test]
    fn graph_prints_the_reduced_topology() {
        let topology = "topology:\n  nodes:\n    a: {kind: linux}\n";
        let mut out = Vec::new();
        let result = graph(topology, Format::Table, &mut out);
        assert!(result.is_ok());
        assert!(String::from_utf8_lossy(&out).contains("NODES (1)"));
    }

    #[test]
    fn graph_accepts_empty_topologies() {
        let mut out = Vec::new();
        let result = graph("topology: {}\n", Format::Table, &mut out);
        assert!(result.is_ok());
        assert!(String::from_utf8_lossy(&out).contains("NODES (0)"));
    }

    #[test]
    fn graph_fails_on_broken_yaml() {
        let mut out = Vec::new();
        let result = graph("not: [valid yaml", Format::Table, &mut out);
        assert!(result.is_err());
    }

    #[test]
    fn check_lists_warnings_without_the_document() {
        let mut out = Vec::new();
        let result = check(DESIGN, Format::Table, &mut out);
        assert!(result.is_ok());

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("warning:"));
        assert!(!text.contains("topology:"));
    }

    #[test]
    fn check_is_quiet_on_clean_designs() {
        let clean = r#"{"name": "ok", "nodes": [{"id": "a", "image": "alpine:3"}], "links": []}"#;
        let mut out = Vec::new();
        let result = check(clean, Format::Table, &mut out);
        assert!(result.is_ok());
        assert_eq!(String::from_utf8_lossy(&out), "No warnings.\n");
    }
}
