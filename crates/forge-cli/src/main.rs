//! Skyforge CLI binary entrypoint.

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use forge_cli::CliError;
use forge_cli::cli::{Cli, Commands};
use forge_cli::commands;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let format = cli.format;
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    match cli.command {
        Commands::Render(args) => {
            let design_json = fs::read_to_string(&args.design)?;
            match args.output {
                Some(path) => {
                    let mut buffer = Vec::new();
                    commands::render(&design_json, format, &mut buffer, &mut stderr)?;
                    fs::write(&path, &buffer)?;
                    writeln!(stderr, "wrote {}", path.display())?;
                }
                None => {
                    commands::render(&design_json, format, &mut stdout, &mut stderr)?;
                }
            }
        }
        Commands::Graph(args) => {
            let topology_yaml = fs::read_to_string(&args.topology)?;
            commands::graph(&topology_yaml, format, &mut stdout)?;
        }
        Commands::Check(args) => {
            let design_json = fs::read_to_string(&args.design)?;
            commands::check(&design_json, format, &mut stdout)?;
        }
    }

    Ok(())
}
