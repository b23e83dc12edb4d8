//! Scoped ownership of one running container

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::runtime::{ContainerRuntime, ExecOutput};

/// A running container that is stopped and removed when the session ends
pub struct ContainerSession<'r> {
    runtime: &'r dyn ContainerRuntime,
    image: String,
    id: String,
    released: bool,
}

impl<'r> ContainerSession<'r> {
    /// Start a container from `image`
    ///
    /// Fails with `ImageNotFound` when the image does not exist; any other
    /// startup failure is passed through unchanged. No cleanup is owed when
    /// this returns an error.
    pub fn acquire(runtime: &'r dyn ContainerRuntime, image: &str) -> Result<Self> {
        let id = runtime.run_detached(image)?;
        debug!("Session {} acquired for {}", id, image);
        Ok(Self {
            runtime,
            image: image.to_string(),
            id,
            released: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Run a shell script inside the container with `bash -c`
    pub fn exec_shell(&self, script: &str) -> Result<ExecOutput> {
        self.runtime.exec(&self.id, &["bash", "-c", script])
    }

    /// Inspect document of the image this container was started from
    pub fn image_attributes(&self) -> Result<Map<String, Value>> {
        self.runtime.image_attributes(&self.image)
    }

    /// Stop and remove the container, reporting the first failure
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        let stopped = self.runtime.stop(&self.id);
        let removed = self.runtime.remove(&self.id);
        debug!("Session {} released", self.id);
        stopped.and(removed)
    }
}

impl Drop for ContainerSession<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.runtime.stop(&self.id) {
            warn!("Failed to stop container {}: {}", self.id, e);
        }
        if let Err(e) = self.runtime.remove(&self.id) {
            warn!("Failed to remove container {}: {}", self.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::fake::{FakeRuntime, FAKE_CONTAINER_ID};

    #[test]
    fn test_drop_stops_and_removes() {
        let runtime = FakeRuntime::new();
        {
            let session = ContainerSession::acquire(&runtime, "img:1").unwrap();
            assert_eq!(session.id(), FAKE_CONTAINER_ID);
        }
        assert_eq!(
            runtime.calls(),
            vec![
                "run img:1".to_string(),
                format!("stop {}", FAKE_CONTAINER_ID),
                format!("remove {}", FAKE_CONTAINER_ID),
            ]
        );
    }

    #[test]
    fn test_release_cleans_up_once() {
        let runtime = FakeRuntime::new();
        let session = ContainerSession::acquire(&runtime, "img:1").unwrap();
        session.release().unwrap();
        let stops = runtime.calls().iter().filter(|c| c.starts_with("stop")).count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_cleanup_on_early_return() {
        fn use_and_bail(runtime: &FakeRuntime) -> Result<()> {
            let session = ContainerSession::acquire(runtime, "img:1")?;
            session.exec_shell("exit 3")?;
            Err(crate::ExtractorError::InvalidOutput("bail".to_string()))
        }

        let runtime = FakeRuntime::new();
        assert!(use_and_bail(&runtime).is_err());
        assert!(runtime.calls().contains(&format!("remove {}", FAKE_CONTAINER_ID)));
    }

    #[test]
    fn test_missing_image_owes_no_cleanup() {
        let runtime = FakeRuntime::new().image_missing();
        let err = ContainerSession::acquire(&runtime, "img:1").err().unwrap();
        assert!(err.is_image_not_found());
        assert_eq!(runtime.calls(), vec!["run img:1".to_string()]);
    }

    #[test]
    fn test_exec_runs_through_bash() {
        let runtime = FakeRuntime::new().with_exec("echo hi", 0, "hi\n");
        let session = ContainerSession::acquire(&runtime, "img:1").unwrap();
        let output = session.exec_shell("echo hi").unwrap();
        assert!(output.success());
        assert_eq!(output.stdout_lossy(), "hi\n");
    }
}
