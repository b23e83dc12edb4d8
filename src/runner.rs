//! Runs the extraction pass over every release image

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::container::ContainerSession;
use crate::derived::apply_derived_fields;
use crate::error::Result;
use crate::extract::{Extractor, STANDARD_PLAN};
use crate::model::{ContainerKind, Record, Release};
use crate::runtime::ContainerRuntime;
use crate::snippets::Snippets;
use crate::store::DataStore;

/// Registry path the release images are published under
pub const DEFAULT_REGISTRY: &str = "nvcr.io/nvidia/merlin/";

/// Snippet key that records the release itself
pub const RELEASE_KEY: &str = "release";

/// What to extract and where to put it
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Registry prefix, including the trailing `/`
    pub registry: String,
    pub release: Release,
    /// JSON data store that records are merged into
    pub data_file: PathBuf,
    /// Containers to process, in order
    pub containers: Vec<ContainerKind>,
}

impl RunConfig {
    pub fn new(release: Release, data_file: PathBuf) -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
            release,
            data_file,
            containers: ContainerKind::ALL.to_vec(),
        }
    }

    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = registry.into();
        self
    }

    pub fn with_containers(mut self, containers: Vec<ContainerKind>) -> Self {
        self.containers = containers;
        self
    }
}

/// Result of processing one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Record extracted and saved
    Recorded,
    /// Image does not exist for this release
    ImageNotFound,
    /// Runtime or data store failure; the image was skipped
    Failed,
}

/// Counts of per-container outcomes for a whole pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub recorded: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl RunSummary {
    fn add(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Recorded => self.recorded += 1,
            Outcome::ImageNotFound => self.not_found += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Drives session, extraction, derived fields and store updates for each
/// container in turn
pub struct MatrixRunner<'r> {
    runtime: &'r dyn ContainerRuntime,
    snippets: Snippets,
    config: RunConfig,
}

impl<'r> MatrixRunner<'r> {
    pub fn new(runtime: &'r dyn ContainerRuntime, snippets: Snippets, config: RunConfig) -> Self {
        Self {
            runtime,
            snippets,
            config,
        }
    }

    /// Process every configured container, one at a time
    pub fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for kind in &self.config.containers {
            let outcome = self.process(*kind);
            summary.add(&outcome);
        }
        info!(
            "Extraction finished: {} recorded, {} not found, {} failed",
            summary.recorded, summary.not_found, summary.failed
        );
        summary
    }

    /// Extract one container's record and merge it into the data store
    pub fn process(&self, kind: ContainerKind) -> Outcome {
        let release = self.config.release.as_str();
        let image = kind.image_reference(&self.config.registry, release);
        info!("Extracting information from: {}", image);

        let session = match ContainerSession::acquire(self.runtime, &image) {
            Ok(session) => session,
            Err(e) if e.is_image_not_found() => {
                info!("...image is not found.");
                return Outcome::ImageNotFound;
            }
            Err(e) => {
                warn!("...could not start {}: {}", image, e);
                return Outcome::Failed;
            }
        };
        info!("...container is running.");

        let record = self.extract_record(kind, &session);
        let saved = self.save_record(kind, record);

        if let Err(e) = session.release() {
            warn!("Failed to clean up container for {}: {}", image, e);
        }

        match saved {
            Ok(()) => Outcome::Recorded,
            Err(e) => {
                error!("Failed to update data store for {}: {}", image, e);
                Outcome::Failed
            }
        }
    }

    /// Build the full record for one container from a live session
    pub fn extract_record(&self, kind: ContainerKind, session: &ContainerSession<'_>) -> Record {
        let mut extractor = Extractor::new(session);

        for (key, text) in self.snippets.mandatory() {
            extractor.insert_snippet(key, text);
        }
        extractor.insert_snippet(RELEASE_KEY, self.config.release.as_str());

        extractor.run_plan(STANDARD_PLAN);
        apply_derived_fields(kind, extractor.record_mut());
        extractor.into_record()
    }

    /// Merge `record` into the store on disk and write it back
    fn save_record(&self, kind: ContainerKind, record: Record) -> Result<()> {
        let container = kind.store_key(&self.config.registry);
        let release = self.config.release.as_str();

        let mut store = DataStore::load(&self.config.data_file)?;
        store.ensure_entry(&container, release);
        store.merge(DataStore::single(&container, release, record));
        store.save(&self.config.data_file)?;

        if let Some(saved) = store.get(&container, release) {
            debug!("{} {}: {:?}", container, release, saved);
        }
        Ok(())
    }
}
