//! Configuration types and defaults for changepack.

use serde::Deserialize;

/// Compression applied to file entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    /// Deflate (default).
    #[default]
    Deflated,
    /// Store files uncompressed.
    Stored,
}

/// Default archive file name, relative to the working directory.
pub fn default_output() -> String {
    "build.zip".to_string()
}
