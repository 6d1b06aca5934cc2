//! # Schema & Loader Error Types

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationViolations;

/// Errors from loading documents or checking them against a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document could not be read or parsed.
    #[error("could not open file '{}': {reason}", .path.display())]
    FileAccess {
        path: PathBuf,
        /// Underlying I/O or parser message.
        reason: String,
    },

    /// The file extension is not one of `.json`, `.yaml`, `.yml`.
    #[error("unsupported file type: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The document did not conform to the schema.
    #[error("schema validation failed:\n{violations}")]
    ValidationFailed { violations: ValidationViolations },

    /// A schema-valid document does not fit the typed document model.
    #[error("malformed document '{}': {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// The schema file could not be read or is not JSON.
    #[error("schema load error for '{}': {reason}", .path.display())]
    SchemaLoad { path: PathBuf, reason: String },

    /// The schema is JSON but not a usable JSON Schema.
    #[error("validator build error for schema {schema}: {reason}")]
    ValidatorBuild { schema: String, reason: String },
}
