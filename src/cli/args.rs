//! CLI argument parsing

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Release;
use crate::runner::DEFAULT_REGISTRY;
use crate::runtime::DEFAULT_RUNTIME;

/// Data store file name used when `--file` is not given
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Snippets file name used when `--snippets` is not given
pub const DEFAULT_SNIPPETS_FILE: &str = "snippets.yaml";

#[derive(Parser, Debug)]
#[command(name = "matrix-extractor")]
#[command(author, about = "Container Extraction Tool", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Release in YY.MM format (defaults to the current year and month)
    #[arg(short = 'v', long = "version", value_name = "YY.MM")]
    pub version: Option<String>,

    /// JSON data file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// YAML snippets file
    #[arg(short, long, value_name = "PATH")]
    pub snippets: Option<PathBuf>,

    /// Registry prefix the release images live under
    #[arg(long, env = "MATRIX_REGISTRY", default_value = DEFAULT_REGISTRY)]
    pub registry: String,

    /// Container runtime binary
    #[arg(long, env = "CONTAINER_RUNTIME", default_value = DEFAULT_RUNTIME)]
    pub runtime: String,
}

impl Args {
    /// The requested release, or the current one
    pub fn release(&self) -> Result<Release> {
        match &self.version {
            Some(version) => version.parse(),
            None => Ok(Release::current()),
        }
    }

    pub fn data_file(&self) -> PathBuf {
        resolve(self.file.as_deref(), DEFAULT_DATA_FILE)
    }

    pub fn snippets_file(&self) -> PathBuf {
        resolve(self.snippets.as_deref(), DEFAULT_SNIPPETS_FILE)
    }
}

/// An explicit path made absolute, or `default_name` next to the executable
fn resolve(explicit: Option<&Path>, default_name: &str) -> PathBuf {
    match explicit {
        Some(path) => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
        None => program_dir().join(default_name),
    }
}

fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
