//! # forge-cli
//!
//! The `skyforge` command-line tool: render lab designs to topology YAML,
//! inspect saved topology documents as reduced graphs, and check designs
//! for advisory warnings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
