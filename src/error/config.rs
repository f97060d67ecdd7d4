use std::path::PathBuf;
use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read plan '{path}': {source}")]
    ReadPlan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML plan '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON plan '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported plan extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Plan file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Plan must include at least one probe.")]
    PlanMissingProbes,
    #[error("Probe {index} must define an endpoint.")]
    ProbeMissingEndpoint { index: usize },
    #[error("Invalid header: {source}")]
    InvalidHeader {
        #[source]
        source: ValidationError,
    },
    #[error("Invalid duration: {source}")]
    InvalidDuration {
        #[source]
        source: ValidationError,
    },
}
