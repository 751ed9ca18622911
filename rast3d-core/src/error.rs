//! Error types for mesh loading and configuration

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning mesh text into triangles
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read mesh file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed record: wrong token count or an unparsable number
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// Face refers to a vertex that has not been defined (yet)
    #[error("line {line}: face references vertex {index} but only {available} are defined")]
    Index {
        line: usize,
        index: usize,
        available: usize,
    },
}

/// Failures while reading a TOML configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
