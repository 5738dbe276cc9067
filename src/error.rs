use std::path::PathBuf;
use thiserror::Error;

use crate::resolved::Layer;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("option '{name}' in group '{group}' is already registered")]
    DuplicateOption { name: String, group: String },

    #[error("failed to parse {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        source: crate::format::FormatError,
    },

    #[error("unknown option '{flag}'")]
    UnknownOption { flag: String },

    #[error("missing required option '{name}' (set via {forms})")]
    MissingRequired { name: String, forms: String },

    #[error("invalid value '{value}' for option '{name}' from {layer}: {reason}")]
    Coercion {
        name: String,
        layer: Layer,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Usage(String),
}
