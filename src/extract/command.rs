//! Arbitrary shell commands

use crate::container::ContainerSession;
use crate::error::{ExtractorError, Result};

/// Key whose output is a whitespace separated list of GPU architectures
pub const ARCH_LIST_KEY: &str = "sm";

pub fn command_output(session: &ContainerSession<'_>, script: &str) -> Result<String> {
    let output = session.exec_shell(script)?;
    if !output.success() {
        return Err(ExtractorError::RuntimeCommand(format!(
            "exit status {}: {}",
            output.status,
            output.stderr_lossy().trim()
        )));
    }
    Ok(output.stdout_lossy().trim().to_string())
}

/// `70\n75\n80` becomes `70, 75, 80`
pub fn format_arch_list(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(", ")
}
