//! Fields computed from values already extracted in the same pass

use crate::model::{ContainerKind, Record, NOT_APPLICABLE};

/// Key holding the image a container was built on
pub const BASE_CONTAINER_KEY: &str = "base_container";

const FRAMEWORK_REGISTRY: &str = "nvcr.io/nvidia/";

/// Compute the derived fields for `kind` and write them into `record`
pub fn apply_derived_fields(kind: ContainerKind, record: &mut Record) {
    let base = base_container(kind, record);
    record.set(BASE_CONTAINER_KEY, base);
}

/// The base container description for one kind of image
///
/// Returns the sentinel whenever an input field is missing or was not
/// extracted.
pub fn base_container(kind: ContainerKind, record: &Record) -> String {
    let derived = match kind {
        ContainerKind::Training => None,
        ContainerKind::TensorflowTraining => {
            framework_image("tensorflow", "nvidia_tensorflow", record)
        }
        ContainerKind::PytorchTraining => framework_image("pytorch", "nvidia_pytorch", record),
        ContainerKind::Inference
        | ContainerKind::TensorflowInference
        | ContainerKind::PytorchInference => triton_release(record),
    };
    derived.unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// `nvcr.io/nvidia/<framework>:<release>-py<major>`
fn framework_image(framework: &str, release_key: &str, record: &Record) -> Option<String> {
    let release = record.extracted(release_key)?;
    let python_major = record.extracted("python_major")?;
    Some(format!(
        "{}{}:{}-py{}",
        FRAMEWORK_REGISTRY, framework, release, python_major
    ))
}

/// Inference images record the TensorRT OSS release under the base key
fn triton_release(record: &Record) -> Option<String> {
    record
        .extracted(BASE_CONTAINER_KEY)
        .map(|version| format!("Triton version {}", version))
}
