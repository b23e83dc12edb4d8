//! Static snippet text supplied alongside the extracted attributes

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{ExtractorError, Result};

/// Snippets every record must carry; loading fails if any is missing
pub const MANDATORY_SNIPPETS: [&str; 3] = ["dgx_system", "nvidia_driver", "gpu_model"];

/// Key → text mapping loaded from a YAML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippets {
    entries: BTreeMap<String, String>,
}

impl Snippets {
    /// Read and validate a snippets file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a YAML mapping and check the mandatory keys
    pub fn parse(content: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)?;
        let mapping = match document {
            Value::Mapping(mapping) => mapping,
            Value::Null => Default::default(),
            other => {
                return Err(ExtractorError::InvalidSnippets(format!(
                    "expected a mapping at the top level, got {:?}",
                    other
                )))
            }
        };

        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            let key = scalar_text(&key).ok_or_else(|| {
                ExtractorError::InvalidSnippets(format!("snippet key is not a scalar: {:?}", key))
            })?;
            if let Some(text) = scalar_text(&value) {
                entries.insert(key, text);
            }
        }

        let snippets = Self { entries };
        snippets.validate()?;
        Ok(snippets)
    }

    fn validate(&self) -> Result<()> {
        for key in MANDATORY_SNIPPETS {
            if self.get(key).map_or(true, |text| text.trim().is_empty()) {
                return Err(ExtractorError::MissingSnippet(key.to_string()));
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// The mandatory snippets as `(key, text)` pairs
    pub fn mandatory(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        MANDATORY_SNIPPETS
            .into_iter()
            .filter_map(move |key| self.get(key).map(|text| (key, text)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r#"
dgx_system: "* DGX-1\n* DGX-2\n* DGX A100\n"
nvidia_driver: |
  NVIDIA Driver version 465.19.01
  or later is required.
gpu_model: "* A100\n* V100\n"
extra: 42
"#;

    #[test]
    fn test_parse_valid() {
        let snippets = Snippets::parse(VALID).unwrap();
        assert_eq!(snippets.len(), 4);
        assert!(snippets.get("nvidia_driver").unwrap().starts_with("NVIDIA Driver"));
        assert_eq!(snippets.get("extra"), Some("42"));
        assert_eq!(snippets.mandatory().count(), 3);
    }

    #[test]
    fn test_missing_mandatory_fails() {
        let err = Snippets::parse("dgx_system: a\nnvidia_driver: b\n").unwrap_err();
        match err {
            ExtractorError::MissingSnippet(key) => assert_eq!(key, "gpu_model"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_mandatory_fails() {
        let err = Snippets::parse("dgx_system: a\nnvidia_driver: b\ngpu_model: ''\n").unwrap_err();
        assert!(matches!(err, ExtractorError::MissingSnippet(_)));
    }

    #[test]
    fn test_non_mapping_fails() {
        assert!(matches!(
            Snippets::parse("- a\n- b\n").unwrap_err(),
            ExtractorError::InvalidSnippets(_)
        ));
    }

    #[test]
    fn test_empty_document_reports_missing() {
        assert!(matches!(
            Snippets::parse("").unwrap_err(),
            ExtractorError::MissingSnippet(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snippets.yaml");
        std::fs::write(&path, VALID).unwrap();
        assert!(Snippets::load(&path).is_ok());
        assert!(Snippets::load(&dir.path().join("missing.yaml")).is_err());
    }
}
