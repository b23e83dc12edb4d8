//! The closed set of container images the extractor knows about

use std::fmt;
use std::str::FromStr;

use crate::error::ExtractorError;

/// One logical image family, independent of registry path and release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Training,
    TensorflowTraining,
    PytorchTraining,
    Inference,
    TensorflowInference,
    PytorchInference,
}

impl ContainerKind {
    /// Every kind, in processing order
    pub const ALL: [ContainerKind; 6] = [
        ContainerKind::Training,
        ContainerKind::TensorflowTraining,
        ContainerKind::PytorchTraining,
        ContainerKind::Inference,
        ContainerKind::TensorflowInference,
        ContainerKind::PytorchInference,
    ];

    /// Image name without registry prefix or tag
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Training => "merlin-training",
            ContainerKind::TensorflowTraining => "merlin-tensorflow-training",
            ContainerKind::PytorchTraining => "merlin-pytorch-training",
            ContainerKind::Inference => "merlin-inference",
            ContainerKind::TensorflowInference => "merlin-tensorflow-inference",
            ContainerKind::PytorchInference => "merlin-pytorch-inference",
        }
    }

    /// Key used for this container in the data store
    pub fn store_key(&self, registry: &str) -> String {
        format!("{}{}", registry, self.name())
    }

    /// Full `registry/name:release` reference used to start a container
    pub fn image_reference(&self, registry: &str, release: &str) -> String {
        format!("{}{}:{}", registry, self.name(), release)
    }
}

impl FromStr for ContainerKind {
    type Err = ExtractorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ExtractorError::UnknownContainer(s.to_string()))
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ContainerKind::ALL {
            assert_eq!(kind.name().parse::<ContainerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_rejected() {
        let err = "merlin-jax-training".parse::<ContainerKind>().unwrap_err();
        assert!(matches!(err, ExtractorError::UnknownContainer(_)));
    }

    #[test]
    fn test_image_reference() {
        let kind = ContainerKind::PytorchInference;
        assert_eq!(
            kind.image_reference("nvcr.io/nvidia/merlin/", "22.03"),
            "nvcr.io/nvidia/merlin/merlin-pytorch-inference:22.03"
        );
        assert_eq!(
            kind.store_key("nvcr.io/nvidia/merlin/"),
            "nvcr.io/nvidia/merlin/merlin-pytorch-inference"
        );
    }
}
