//! Attribute extraction from a running container
//!
//! Every extraction writes the sentinel to its key first and only replaces
//! it on success. Failures are logged and never propagate, so one bad
//! field cannot stop the rest of the record from being filled in.

pub mod command;
pub mod env;
pub mod image;
pub mod pip;

pub use command::{format_arch_list, ARCH_LIST_KEY};
pub use image::format_gigabytes;

use tracing::info;

use crate::container::ContainerSession;
use crate::error::Result;
use crate::model::Record;

/// One attribute lookup. `key` overrides where the value is stored; when
/// `None` the lookup name doubles as the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Variable defined by a shell file, e.g. `/etc/os-release`
    EnvFile {
        path: &'static str,
        lookup: &'static str,
        key: Option<&'static str>,
    },
    /// Variable in the container's environment
    Env {
        lookup: &'static str,
        key: Option<&'static str>,
    },
    /// Installed Python package version
    Pip {
        package: &'static str,
        key: Option<&'static str>,
    },
    /// Field of the image inspect document
    Image {
        field: &'static str,
        key: Option<&'static str>,
    },
    /// Trimmed stdout of a shell script
    Command {
        script: &'static str,
        key: &'static str,
    },
}

const fn env_var(lookup: &'static str, key: &'static str) -> Extraction {
    Extraction::Env {
        lookup,
        key: Some(key),
    }
}

const fn pip_package(package: &'static str) -> Extraction {
    Extraction::Pip { package, key: None }
}

/// Lookups run against every container, in order
pub const STANDARD_PLAN: &[Extraction] = &[
    Extraction::Image {
        field: "Size",
        key: Some("size"),
    },
    Extraction::EnvFile {
        path: "/etc/os-release",
        lookup: "PRETTY_NAME",
        key: Some("os"),
    },
    env_var("CUDA_VERSION", "cuda"),
    pip_package("rmm"),
    pip_package("cudf"),
    env_var("CUDNN_VERSION", "cudnn"),
    pip_package("nvtabular"),
    pip_package("transformers4rec"),
    pip_package("merlin.core"),
    pip_package("merlin.systems"),
    pip_package("merlin.models"),
    pip_package("hugectr2onnx"),
    pip_package("hugectr"),
    pip_package("sparse_operation_kit"),
    Extraction::Pip {
        package: "tensorflow",
        key: Some("tf"),
    },
    Extraction::Pip {
        package: "torch",
        key: Some("pytorch"),
    },
    env_var("CUBLAS_VERSION", "cublas"),
    env_var("CUFFT_VERSION", "cufft"),
    env_var("CURAND_VERSION", "curand"),
    env_var("CUSOLVER_VERSION", "cusolver"),
    env_var("CUSPARSE_VERSION", "cusparse"),
    env_var("CUTENSOR_VERSION", "cutensor"),
    env_var("NVIDIA_TENSORFLOW_VERSION", "nvidia_tensorflow"),
    env_var("NVIDIA_PYTORCH_VERSION", "nvidia_pytorch"),
    env_var("OPENMPI_VERSION", "openmpi"),
    env_var("TRT_VERSION", "tensorrt"),
    env_var("TRTOSS_VERSION", "base_container"),
    Extraction::Command {
        script: "if [ ! -f /usr/local/hugectr/lib/libhuge_ctr_shared.so ]; then exit 1; fi; \
                 cuobjdump /usr/local/hugectr/lib/libhuge_ctr_shared.so | grep arch | sed -e 's/.*sm_//'",
        key: ARCH_LIST_KEY,
    },
    Extraction::Command {
        script: "cat /opt/tritonserver/TRITON_VERSION",
        key: "triton",
    },
    Extraction::Command {
        script: "python -c \"import sys;print(sys.version_info[0]);\"",
        key: "python_major",
    },
];

impl Extraction {
    /// Record key this extraction writes
    pub fn key(&self) -> &'static str {
        match *self {
            Extraction::EnvFile { lookup, key, .. } => key.unwrap_or(lookup),
            Extraction::Env { lookup, key } => key.unwrap_or(lookup),
            Extraction::Pip { package, key } => key.unwrap_or(package),
            Extraction::Image { field, key } => key.unwrap_or(field),
            Extraction::Command { key, .. } => key,
        }
    }
}

/// Builds one container's [`Record`] from a live session
pub struct Extractor<'s, 'r> {
    session: &'s ContainerSession<'r>,
    record: Record,
}

impl<'s, 'r> Extractor<'s, 'r> {
    pub fn new(session: &'s ContainerSession<'r>) -> Self {
        Self {
            session,
            record: Record::new(),
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    /// Run every extraction in `plan`, in order
    pub fn run_plan(&mut self, plan: &[Extraction]) {
        for extraction in plan {
            self.apply(extraction);
        }
    }

    pub fn apply(&mut self, extraction: &Extraction) {
        match *extraction {
            Extraction::EnvFile { path, lookup, key } => self.read_env_file(path, lookup, key),
            Extraction::Env { lookup, key } => self.read_env(lookup, key),
            Extraction::Pip { package, key } => self.read_pip(package, key),
            Extraction::Image { field, key } => self.read_image(field, key),
            Extraction::Command { script, key } => self.run_command(script, key),
        }
    }

    pub fn read_env_file(&mut self, path: &str, lookup: &str, key: Option<&str>) {
        let result = env::env_value(self.session, Some(path), lookup);
        if let Err(e) = self.store(key.unwrap_or(lookup), result) {
            info!("Failed to get env var '{}' from file '{}': {}", lookup, path, e);
        }
    }

    pub fn read_env(&mut self, lookup: &str, key: Option<&str>) {
        let result = env::env_value(self.session, None, lookup);
        if let Err(e) = self.store(key.unwrap_or(lookup), result) {
            info!("Failed to get env var '{}': {}", lookup, e);
        }
    }

    pub fn read_pip(&mut self, package: &str, key: Option<&str>) {
        let result = pip::package_version(self.session, package);
        if let Err(e) = self.store(key.unwrap_or(package), result) {
            info!("Failed to get package version from pip '{}': {}", package, e);
        }
    }

    pub fn read_image(&mut self, field: &str, key: Option<&str>) {
        let result = self
            .session
            .image_attributes()
            .and_then(|attrs| image::image_attribute(&attrs, field));
        if let Err(e) = self.store(key.unwrap_or(field), result) {
            info!("Failed to get attr from image '{}': {}", field, e);
        }
    }

    pub fn run_command(&mut self, script: &str, key: &str) {
        let result = command::command_output(self.session, script).map(|output| {
            if key == ARCH_LIST_KEY {
                format_arch_list(&output)
            } else {
                output
            }
        });
        if let Err(e) = self.store(key, result) {
            info!("Command '{}' failed: {}", script, e);
        }
    }

    /// Static text that is recorded verbatim rather than extracted
    pub fn insert_snippet(&mut self, key: &str, text: &str) {
        self.record.set(key, text);
    }

    fn store(&mut self, key: &str, result: Result<String>) -> Result<()> {
        self.record.mark_not_applicable(key);
        let value = result?;
        self.record.set(key, value);
        Ok(())
    }
}
