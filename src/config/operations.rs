//! Config loading and validation.

use super::model::Config;
use crate::changeset::build_exclude_set;
use crate::error::{ChangepackError, Result};
use std::path::Path;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".changepack.yaml";

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ChangepackError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the configuration for a run in `cwd`.
    ///
    /// An explicit path must exist. Without one, `.changepack.yaml` is used
    /// when present and defaults otherwise.
    pub fn discover(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let path = cwd.join(path);
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let default_path = cwd.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            debug!(path = %default_path.display(), "loading config");
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            ChangepackError::Config(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `output` must be non-empty
    /// - every `exclude` entry must be a valid glob
    pub fn validate(&self) -> Result<()> {
        if self.output.trim().is_empty() {
            return Err(ChangepackError::Config(
                "config validation failed: output must not be empty".to_string(),
            ));
        }

        build_exclude_set(&self.exclude)?;
        Ok(())
    }
}
