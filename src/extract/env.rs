//! Environment variable lookups inside a container

use crate::container::ContainerSession;
use crate::error::{ExtractorError, Result};

/// Echo `$lookup` inside the container, optionally after sourcing `file`
pub fn env_value(session: &ContainerSession<'_>, file: Option<&str>, lookup: &str) -> Result<String> {
    let script = match file {
        Some(path) => format!("source {}; echo ${{{}}}", path, lookup),
        None => format!("echo ${{{}}}", lookup),
    };
    let output = session.exec_shell(&script)?;
    if !output.success() {
        return Err(ExtractorError::RuntimeCommand(format!(
            "exit status {}: {}",
            output.status,
            output.stderr_lossy().trim()
        )));
    }
    clean_env_output(&output.stdout_lossy())
        .ok_or_else(|| ExtractorError::InvalidOutput(format!("'{}' is empty", lookup)))
}

/// Strip quotes and surrounding whitespace; blank output means unset
pub fn clean_env_output(raw: &str) -> Option<String> {
    let cleaned = raw.replace('"', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
