//! Matrix Extractor - release container support-matrix extraction
//!
//! Starts a throwaway container for every release image, reads software
//! versions out of it, and merges the results into a JSON data store keyed
//! by container and release. The data store is later rendered as a
//! support matrix.
//!
//! # Example
//!
//! ```no_run
//! use matrix_extractor::{DockerCli, MatrixRunner, RunConfig, Snippets};
//! use std::path::{Path, PathBuf};
//!
//! let runtime = DockerCli::default();
//! let snippets = Snippets::load(Path::new("snippets.yaml")).unwrap();
//! let config = RunConfig::new("22.02".parse().unwrap(), PathBuf::from("data.json"));
//! let summary = MatrixRunner::new(&runtime, snippets, config).run();
//! println!("{} records written", summary.recorded);
//! ```

pub mod cli;
pub mod container;
pub mod derived;
pub mod error;
pub mod extract;
pub mod model;
pub mod runner;
pub mod runtime;
pub mod snippets;
pub mod store;

pub use container::ContainerSession;
pub use error::{ExtractorError, Result};
pub use extract::{Extraction, Extractor, STANDARD_PLAN};
pub use model::{ContainerKind, Record, Release, NOT_APPLICABLE};
pub use runner::{MatrixRunner, Outcome, RunConfig, RunSummary};
pub use runtime::{ContainerRuntime, DockerCli, ExecOutput};
pub use snippets::Snippets;
pub use store::DataStore;
