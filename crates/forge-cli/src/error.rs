//! Error types for the CLI.

use thiserror::Error;

/// Errors surfaced to the user by the `skyforge` tool.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A design or topology document could not be decoded.
    #[error(transparent)]
    Topo(#[from] forge_topo::TopoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topo_errors_pass_through_unwrapped() {
        let parse_err = match forge_topo::parse_topology_graph("not: [valid yaml") {
            Err(e) => CliError::from(e),
            Ok(_) => panic!("expected a parse error"),
        };
        assert!(parse_err.to_string().starts_with("invalid topology yaml:"));
    }
}
