//! Validator configuration.
//!
//! Every field has a default, so an empty YAML file (or none at all) is a
//! valid configuration. Sources, lowest precedence first: defaults, a YAML
//! file, environment variables, then whatever the caller sets explicitly.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spdxv_schema::ViolationPolicy;

/// Search path list (platform path-list syntax) overriding `spdx_dirs`.
pub const ENV_SPDX_DIRS: &str = "SPDX_VALIDATOR_DIRS";
/// Schema file overriding `schema_file`.
pub const ENV_SCHEMA_FILE: &str = "SPDX_VALIDATOR_SCHEMA";

/// Settings for one [`SpdxValidator`](crate::SpdxValidator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// SPDX version to validate against. Only `2.2` is supported.
    pub spdx_version: String,
    /// JSON Schema file; `None` selects the built-in schema.
    pub schema_file: Option<PathBuf>,
    /// Directories searched for referenced manifests.
    pub spdx_dirs: Vec<PathBuf>,
    /// Emit low-level causes of file and parse failures.
    pub debug: bool,
    /// Report every schema violation, or only the first.
    pub violation_policy: ViolationPolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            spdx_version: "2.2".to_string(),
            schema_file: None,
            spdx_dirs: vec![PathBuf::from(".")],
            debug: false,
            violation_policy: ViolationPolicy::default(),
        }
    }
}

impl ValidatorConfig {
    /// Parse a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str::<Option<Self>>(yaml)
            .map(Option::unwrap_or_default)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::Parse(reason) => ConfigError::Read {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Apply [`ENV_SPDX_DIRS`] and [`ENV_SCHEMA_FILE`] from the process
    /// environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var_os(key))
    }

    /// Apply environment-style overrides from an arbitrary lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        if let Some(dirs) = lookup(ENV_SPDX_DIRS) {
            let dirs: Vec<PathBuf> = std::env::split_paths(&dirs)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            if !dirs.is_empty() {
                self.spdx_dirs = dirs;
            }
        }
        if let Some(schema) = lookup(ENV_SCHEMA_FILE) {
            if !schema.is_empty() {
                self.schema_file = Some(PathBuf::from(schema));
            }
        }
        self
    }

    /// The effective search path: `spdx_dirs`, or `["."]` when empty.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        if self.spdx_dirs.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.spdx_dirs.clone()
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file '{}': {reason}", .path.display())]
    Read { path: PathBuf, reason: String },
    #[error("invalid configuration: {0}")]
    Parse(String),
}
