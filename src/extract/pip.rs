//! Python package versions from pip metadata
//!
//! `pip show` reads installed metadata without importing the package, so
//! packages that need a GPU at import time still report a version.

use crate::container::ContainerSession;
use crate::error::{ExtractorError, Result};

pub fn package_version(session: &ContainerSession<'_>, package: &str) -> Result<String> {
    let output = session.exec_shell(&format!("python -m pip show '{}'", package))?;
    if !output.success() {
        return Err(ExtractorError::RuntimeCommand(format!(
            "pip show exited with {}",
            output.status
        )));
    }
    parse_pip_version(&output.stdout_lossy())
}

/// Marker that starts the version line of `pip show` output
const VERSION_MARKER: &str = "Version:";

/// Pull the value of the single `Version:` line out of `pip show` output
///
/// The value is the last whitespace separated token on that line. No
/// version line, or more than one, is an error.
pub fn parse_pip_version(output: &str) -> Result<String> {
    let lines: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with(VERSION_MARKER))
        .collect();

    let line = match lines.as_slice() {
        [line] => *line,
        _ => {
            return Err(ExtractorError::InvalidOutput(format!(
                "expected one Version line, found {}: {}",
                lines.len(),
                output.trim()
            )))
        }
    };

    line[VERSION_MARKER.len()..]
        .split_whitespace()
        .last()
        .map(str::to_string)
        .ok_or_else(|| ExtractorError::InvalidOutput(format!("empty version line: {}", line.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIP_SHOW: &str = "Name: nvtabular\n\
Version: 0.11.0\n\
Summary: GPU feature engineering\n\
Location: /usr/local/lib/python3.8/dist-packages\n";

    #[test]
    fn test_parse_single_version() {
        assert_eq!(parse_pip_version(PIP_SHOW).unwrap(), "0.11.0");
    }

    #[test]
    fn test_parse_crlf() {
        assert_eq!(
            parse_pip_version("Name: torch\r\nVersion: 1.11.0a0\r\n").unwrap(),
            "1.11.0a0"
        );
    }

    #[test]
    fn test_parse_no_version_fails() {
        assert!(parse_pip_version("WARNING: Package(s) not found: rmm\n").is_err());
    }

    #[test]
    fn test_parse_ambiguous_fails() {
        let doubled = format!("{}---\n{}", PIP_SHOW, PIP_SHOW);
        assert!(parse_pip_version(&doubled).is_err());
    }

    #[test]
    fn test_malformed_second_version_line_is_ambiguous() {
        assert!(parse_pip_version("Name: x\nVersion: 1.0\nVersion:\n").is_err());
        assert!(parse_pip_version("Version: 1.0\nVersion: 2.0 rc\n").is_err());
    }

    #[test]
    fn test_last_token_of_version_line() {
        assert_eq!(parse_pip_version("Version: 1.0 rc1\n").unwrap(), "rc1");
    }

    #[test]
    fn test_empty_version_does_not_borrow_next_line() {
        assert!(parse_pip_version("Version:\n1.0\n").is_err());
    }

    #[test]
    fn test_indented_version_ignored() {
        assert!(parse_pip_version("  Version: 1.0\n").is_err());
    }
}
