//! # Manifest Loader
//!
//! Reads SPDX documents from disk into the JSON value model. The format is
//! chosen from the file extension alone (case-insensitive); content
//! sniffing is never attempted.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use spdxv_core::SpdxDocument;

use crate::error::SchemaError;

/// On-disk encodings of an SPDX document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Determine the format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// `SchemaError::UnsupportedFormat` for anything but `.json`, `.yaml`
    /// and `.yml`.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(SchemaError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

/// Load the document at `path` as a JSON value tree.
///
/// # Errors
///
/// `SchemaError::UnsupportedFormat` if the extension is not recognized,
/// `SchemaError::FileAccess` if the file cannot be read or parsed. The
/// reason carries the underlying I/O or parser message.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    let format = DocumentFormat::from_path(path)?;
    tracing::debug!(file = %path.display(), %format, "reading document");

    let access = |reason: String| SchemaError::FileAccess {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| access(format!("cannot read file: {e}")))?;

    match format {
        DocumentFormat::Json => {
            serde_json::from_str(&content).map_err(|e| access(format!("invalid JSON: {e}")))
        }
        DocumentFormat::Yaml => {
            let yaml_value: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| access(format!("invalid YAML: {e}")))?;
            yaml_to_json_value(&yaml_value)
                .map_err(|e| access(format!("YAML-to-JSON conversion failed: {e}")))
        }
    }
}

/// Decode a schema-checked value tree into the typed document model.
///
/// # Errors
///
/// `SchemaError::Malformed` if a modelled field has the wrong shape, which
/// only happens when the schema in use is looser than SPDX 2.2.
pub fn decode_document(value: &Value, path: &Path) -> Result<SpdxDocument, SchemaError> {
    SpdxDocument::deserialize(value).map_err(|e| SchemaError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// SPDX documents use only the JSON-compatible subset of YAML. Tags are
/// dropped and scalar map keys are stringified.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
