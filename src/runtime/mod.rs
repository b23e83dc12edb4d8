//! Container runtime interface
//!
//! The extractor only needs a handful of operations from the runtime:
//! start a detached container, exec into it, stop and remove it, and read
//! the image's inspect document. [`DockerCli`] provides them by shelling out
//! to a docker-compatible binary.

mod docker;

#[cfg(test)]
pub(crate) mod fake;

pub use docker::{is_image_not_found_message, DockerCli, DEFAULT_RUNTIME};

use serde_json::{Map, Value};

use crate::error::Result;

/// Result of running a command inside a container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit status of the command (`-1` if it was killed by a signal)
    pub status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Operations consumed from a container runtime
pub trait ContainerRuntime {
    /// Start a detached, interactive container sharing the host IPC
    /// namespace and return its id.
    ///
    /// Returns [`ExtractorError::ImageNotFound`](crate::ExtractorError::ImageNotFound)
    /// when the image cannot be located.
    fn run_detached(&self, image: &str) -> Result<String>;

    /// Run `argv` inside a running container
    fn exec(&self, container_id: &str, argv: &[&str]) -> Result<ExecOutput>;

    fn stop(&self, container_id: &str) -> Result<()>;

    fn remove(&self, container_id: &str) -> Result<()>;

    /// Top-level fields of the image's inspect document
    fn image_attributes(&self, image: &str) -> Result<Map<String, Value>>;
}
