//! Config struct definition and default implementation.

use super::types::*;
use serde::Deserialize;

/// Configuration for a packaging run.
///
/// This struct represents the contents of `.changepack.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Archive path, relative to the working directory (default: "build.zip").
    #[serde(default = "default_output")]
    pub output: String,

    /// Compression used for file entries.
    #[serde(default)]
    pub compression: Compression,

    /// Glob patterns; matching change records are not packaged.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            compression: Compression::default(),
            exclude: Vec::new(),
        }
    }
}
