//! Matrix Extractor CLI - record container versions for one release

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use matrix_extractor::cli::Args;
use matrix_extractor::{DockerCli, MatrixRunner, RunConfig, Snippets};

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// `info` by default, `debug` when `DEBUG` is set; `RUST_LOG` wins over both
fn init_logging() {
    let default_level = if std::env::var_os("DEBUG").is_some() {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let release = args.release()?;
    let snippets_file = args.snippets_file();
    let snippets = Snippets::load(&snippets_file)
        .with_context(|| format!("failed to load snippets from {}", snippets_file.display()))?;

    let config = RunConfig::new(release, args.data_file()).with_registry(args.registry.clone());
    let runtime = DockerCli::new(args.runtime.clone());

    MatrixRunner::new(&runtime, snippets, config).run();
    Ok(())
}
