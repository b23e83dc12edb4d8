//! Release identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractorError;

/// A release tag such as `22.02`
///
/// Treated as an opaque string once constructed; only the default value is
/// derived from the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Release(String);

impl Release {
    /// The release for the current local year and month (`YY.MM`)
    pub fn current() -> Self {
        Self(chrono::Local::now().format("%y.%m").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Release {
    type Err = ExtractorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ExtractorError::InvalidRelease(
                "release must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
