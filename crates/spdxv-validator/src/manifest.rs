//! A loaded SPDX document.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde_json::Value;
use spdxv_core::SpdxDocument;
use spdxv_schema::decode_document;

use crate::error::ValidationError;

/// One manifest as read from disk: the raw tree, and the typed document
/// decoded from it on first use.
///
/// Only the relationship walk needs the typed view, so a document that
/// passes a looser schema than SPDX 2.2 is never decoded in non-recursive
/// mode.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    raw: Value,
    document: OnceLock<SpdxDocument>,
}

impl Manifest {
    pub(crate) fn new(path: PathBuf, raw: Value) -> Self {
        Self {
            path,
            raw,
            document: OnceLock::new(),
        }
    }

    /// File the manifest was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The typed document.
    ///
    /// # Errors
    ///
    /// `SchemaViolation` if a field the cross-document walk reads has the
    /// wrong shape, which only happens under a schema looser than SPDX 2.2.
    pub fn document(&self) -> Result<&SpdxDocument, ValidationError> {
        if let Some(document) = self.document.get() {
            return Ok(document);
        }
        let decoded = decode_document(&self.raw, &self.path)
            .map_err(|e| ValidationError::from_schema(e, &self.path))?;
        Ok(self.document.get_or_init(|| decoded))
    }

    /// The document tree exactly as parsed, including fields the typed
    /// model does not carry.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The document `name`, or an empty string when absent.
    pub fn name(&self) -> &str {
        self.raw.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

impl PartialEq for Manifest {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.raw == other.raw
    }
}
