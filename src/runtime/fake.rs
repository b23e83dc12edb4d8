//! Scripted in-memory runtime for tests

use std::cell::RefCell;

use serde_json::{Map, Value};

use super::{ContainerRuntime, ExecOutput};
use crate::error::{ExtractorError, Result};

pub(crate) const FAKE_CONTAINER_ID: &str = "c0ffee";

/// Runtime whose exec results are matched by substring against the last
/// argv element (the shell script). Unmatched commands exit with status 1.
#[derive(Debug, Default)]
pub(crate) struct FakeRuntime {
    responses: Vec<(String, ExecOutput)>,
    attributes: Map<String, Value>,
    image_missing: bool,
    unreachable: bool,
    exec_fails: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeRuntime {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_exec(mut self, pattern: &str, status: i32, stdout: &str) -> Self {
        self.responses.push((
            pattern.to_string(),
            ExecOutput {
                status,
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            },
        ));
        self
    }

    pub(crate) fn with_failing_exec(mut self, pattern: &str, status: i32, stderr: &str) -> Self {
        self.responses.push((
            pattern.to_string(),
            ExecOutput {
                status,
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
            },
        ));
        self
    }

    pub(crate) fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    pub(crate) fn image_missing(mut self) -> Self {
        self.image_missing = true;
        self
    }

    pub(crate) fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Make every exec and image inspect fail at the runtime level
    pub(crate) fn exec_fails(mut self) -> Self {
        self.exec_fails = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ContainerRuntime for FakeRuntime {
    fn run_detached(&self, image: &str) -> Result<String> {
        self.record(format!("run {}", image));
        if self.unreachable {
            return Err(ExtractorError::RuntimeUnavailable("daemon down".to_string()));
        }
        if self.image_missing {
            return Err(ExtractorError::ImageNotFound(image.to_string()));
        }
        Ok(FAKE_CONTAINER_ID.to_string())
    }

    fn exec(&self, container_id: &str, argv: &[&str]) -> Result<ExecOutput> {
        let script = argv.last().copied().unwrap_or_default();
        self.record(format!("exec {} {}", container_id, script));
        if self.exec_fails {
            return Err(ExtractorError::RuntimeCommand("connection reset".to_string()));
        }
        Ok(self
            .responses
            .iter()
            .find(|(pattern, _)| script.contains(pattern.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or(ExecOutput {
                status: 1,
                stdout: Vec::new(),
                stderr: b"command not scripted".to_vec(),
            }))
    }

    fn stop(&self, container_id: &str) -> Result<()> {
        self.record(format!("stop {}", container_id));
        Ok(())
    }

    fn remove(&self, container_id: &str) -> Result<()> {
        self.record(format!("remove {}", container_id));
        Ok(())
    }

    fn image_attributes(&self, image: &str) -> Result<Map<String, Value>> {
        self.record(format!("inspect {}", image));
        if self.exec_fails {
            return Err(ExtractorError::RuntimeCommand("connection reset".to_string()));
        }
        Ok(self.attributes.clone())
    }
}
