//! Fields of the image inspect document

use bytesize::GIB;
use serde_json::{Map, Value};

use crate::error::{ExtractorError, Result};

/// Attribute whose byte count is rendered in gigabytes
pub const SIZE_ATTRIBUTE: &str = "Size";

/// Render one top-level inspect field as text
pub fn image_attribute(attrs: &Map<String, Value>, field: &str) -> Result<String> {
    let value = attrs
        .get(field)
        .ok_or_else(|| ExtractorError::InvalidOutput(format!("image has no '{}' attribute", field)))?;

    if field == SIZE_ATTRIBUTE {
        let bytes = value.as_u64().ok_or_else(|| {
            ExtractorError::InvalidOutput(format!("image size is not a byte count: {}", value))
        })?;
        return Ok(format_gigabytes(bytes));
    }

    Ok(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Bytes as gigabytes rounded to two places, e.g. `10.0 GB` or `7.31 GB`
pub fn format_gigabytes(bytes: u64) -> String {
    let gigabytes = bytes as f64 / GIB as f64;
    let rounded = (gigabytes * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.1} GB", rounded)
    } else {
        format!("{} GB", rounded)
    }
}
