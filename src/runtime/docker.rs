//! Docker CLI backed runtime

use std::process::{Command, Output};

use serde_json::{Map, Value};
use tracing::debug;

use super::{ContainerRuntime, ExecOutput};
use crate::error::{ExtractorError, Result};

/// Default runtime binary
pub const DEFAULT_RUNTIME: &str = "docker";

/// Detects if runtime stderr means the image does not exist.
///
/// Patterns seen from docker and podman:
/// - "No such image"
/// - "manifest unknown" / "manifest ... not found"
/// - "pull access denied" (private or missing repository)
/// - "Unable to find image ... not found"
pub fn is_image_not_found_message(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    lower.contains("no such image")
        || lower.contains("manifest unknown")
        || lower.contains("pull access denied")
        || (lower.contains("manifest") && lower.contains("not found"))
        || (lower.contains("unable to find image") && lower.contains("not found"))
}

/// Runtime that drives a docker-compatible CLI
#[derive(Debug, Clone)]
pub struct DockerCli {
    runtime_path: String,
}

impl DockerCli {
    pub fn new(runtime_path: impl Into<String>) -> Self {
        Self {
            runtime_path: runtime_path.into(),
        }
    }

    fn invoke(&self, args: &[&str]) -> Result<Output> {
        debug!("Executing runtime command: {} {}", self.runtime_path, args.join(" "));

        Command::new(&self.runtime_path)
            .args(args)
            .output()
            .map_err(|e| {
                ExtractorError::RuntimeUnavailable(format!(
                    "failed to execute '{}': {}",
                    self.runtime_path, e
                ))
            })
    }

    /// Run a command that must succeed and return its trimmed stdout
    fn invoke_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.invoke(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractorError::RuntimeCommand(format!(
                "{} {}: {}",
                self.runtime_path,
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

impl ContainerRuntime for DockerCli {
    fn run_detached(&self, image: &str) -> Result<String> {
        let output = self.invoke(&[
            "run", "--detach", "--interactive", "--tty", "--ipc", "host", image, "bash",
        ])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_image_not_found_message(&stderr) {
                return Err(ExtractorError::ImageNotFound(image.to_string()));
            }
            return Err(ExtractorError::RuntimeCommand(format!(
                "failed to start {}: {}",
                image,
                stderr.trim()
            )));
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(ExtractorError::InvalidOutput(format!(
                "runtime returned no container id for {}",
                image
            )));
        }
        debug!("Started container {} from {}", id, image);
        Ok(id)
    }

    fn exec(&self, container_id: &str, argv: &[&str]) -> Result<ExecOutput> {
        let mut args = vec!["exec", container_id];
        args.extend_from_slice(argv);
        let output = self.invoke(&args)?;

        Ok(ExecOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn stop(&self, container_id: &str) -> Result<()> {
        self.invoke_checked(&["stop", container_id]).map(|_| ())
    }

    fn remove(&self, container_id: &str) -> Result<()> {
        self.invoke_checked(&["rm", container_id]).map(|_| ())
    }

    fn image_attributes(&self, image: &str) -> Result<Map<String, Value>> {
        let output = self.invoke(&["image", "inspect", "--format", "{{json .}}", image])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_image_not_found_message(&stderr) {
                return Err(ExtractorError::ImageNotFound(image.to_string()));
            }
            return Err(ExtractorError::RuntimeCommand(format!(
                "failed to inspect {}: {}",
                image,
                stderr.trim()
            )));
        }

        match serde_json::from_slice::<Value>(&output.stdout)? {
            Value::Object(attrs) => Ok(attrs),
            other => Err(ExtractorError::InvalidOutput(format!(
                "expected an object from image inspect, got {}",
                other
            ))),
        }
    }
}
