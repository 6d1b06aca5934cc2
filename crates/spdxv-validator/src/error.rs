//! # Validation Errors
//!
//! One flat error type for everything a validation call can fail with.
//! Every failure is terminal for the call: nothing is retried and nothing
//! is downgraded to a warning. Each variant carries the context needed to
//! act on it (file, element id, expected and actual checksum).

use std::path::{Path, PathBuf};

use spdxv_core::{IdentifierError, UnsupportedSpdxVersion};
use spdxv_crypto::CryptoError;
use spdxv_schema::{SchemaError, ValidationViolations};
use thiserror::Error;

/// Why a validation call failed.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error(transparent)]
    UnsupportedSpdxVersion(#[from] UnsupportedSpdxVersion),

    /// A manifest or referenced file could not be opened or parsed.
    #[error("could not open file '{}': {reason}", .path.display())]
    FileAccess { path: PathBuf, reason: String },

    #[error("unsupported file type: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("schema validation failed for '{}':\n{violations}", .path.display())]
    SchemaViolation {
        path: PathBuf,
        violations: ValidationViolations,
    },

    /// The configured schema could not be loaded or compiled.
    #[error("could not load schema {schema}: {reason}")]
    SchemaLoad { schema: String, reason: String },

    #[error(transparent)]
    MalformedElementId(#[from] IdentifierError),

    #[error("could not find manifest file for: {element_id} (searched {})", display_paths(.search_dirs))]
    ManifestNotFound {
        element_id: String,
        search_dirs: Vec<PathBuf>,
    },

    #[error("found {count} manifest files for: {element_id} ({})", display_paths(.candidates))]
    AmbiguousManifest {
        element_id: String,
        count: usize,
        candidates: Vec<PathBuf>,
    },

    #[error("could not find related element: {element} in '{}'", .path.display())]
    DanglingRelatedElement { element: String, path: PathBuf },

    #[error("could not find {doc_ref} in \"externalDocumentRefs\" in '{}'", .path.display())]
    MissingExternalDocRef { doc_ref: String, path: PathBuf },

    #[error(
        "checksum for '{}' ({actual}) is not the same as in the \"externalDocumentRefs\" ({expected}) in '{}'",
        .file.display(),
        .referenced_from.display()
    )]
    ChecksumMismatch {
        file: PathBuf,
        expected: String,
        actual: String,
        referenced_from: PathBuf,
    },

    #[error("could not find: {element_id} in file: '{}'", .file.display())]
    UnresolvedBackReference { element_id: String, file: PathBuf },

    #[error("unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl ValidationError {
    /// Convert a loader or schema error raised for the document at `path`.
    pub fn from_schema(err: SchemaError, path: &Path) -> Self {
        match err {
            SchemaError::FileAccess { path, reason } => Self::FileAccess { path, reason },
            SchemaError::UnsupportedFormat { path } => Self::UnsupportedFormat { path },
            SchemaError::ValidationFailed { violations } => Self::SchemaViolation {
                path: path.to_path_buf(),
                violations,
            },
            SchemaError::Malformed { path, reason } => Self::SchemaViolation {
                path,
                violations: ValidationViolations::single(reason),
            },
            SchemaError::SchemaLoad { path, reason } => Self::SchemaLoad {
                schema: format!("'{}'", path.display()),
                reason,
            },
            SchemaError::ValidatorBuild { schema, reason } => Self::SchemaLoad { schema, reason },
        }
    }

    /// Stable name of the failure kind, for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedSpdxVersion(_) => "UnsupportedSpdxVersion",
            Self::FileAccess { .. } => "FileAccessError",
            Self::UnsupportedFormat { .. } => "UnsupportedFormat",
            Self::SchemaViolation { .. } => "SchemaViolation",
            Self::SchemaLoad { .. } => "SchemaLoad",
            Self::MalformedElementId(_) => "MalformedElementId",
            Self::ManifestNotFound { .. } => "ManifestNotFound",
            Self::AmbiguousManifest { .. } => "AmbiguousManifest",
            Self::DanglingRelatedElement { .. } => "DanglingRelatedElement",
            Self::MissingExternalDocRef { .. } => "MissingExternalDocRef",
            Self::ChecksumMismatch { .. } => "ChecksumMismatch",
            Self::UnresolvedBackReference { .. } => "UnresolvedBackReference",
            Self::UnsupportedAlgorithm(_) => "UnsupportedAlgorithm",
        }
    }
}

impl From<CryptoError> for ValidationError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::UnsupportedAlgorithm(name) => Self::UnsupportedAlgorithm(name),
            CryptoError::Io { path, source } => Self::FileAccess {
                path,
                reason: format!("cannot read file for checksum: {source}"),
            },
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_message_lists_candidates() {
        let err = ValidationError::AmbiguousManifest {
            element_id: "libfoo-1.2:SPDXRef-Package".to_string(),
            count: 2,
            candidates: vec![
                PathBuf::from("./libfoo-1.2.json"),
                PathBuf::from("./libfoo/libfoo-1.2.json"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "found 2 manifest files for: libfoo-1.2:SPDXRef-Package \
             (./libfoo-1.2.json, ./libfoo/libfoo-1.2.json)"
        );
        assert_eq!(err.kind(), "AmbiguousManifest");
    }

    #[test]
    fn checksum_mismatch_carries_both_values() {
        let err = ValidationError::ChecksumMismatch {
            file: PathBuf::from("deps/libfoo-1.2.json"),
            expected: "aaaa".to_string(),
            actual: "bbbb".to_string(),
            referenced_from: PathBuf::from("app.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("aaaa") && msg.contains("bbbb"), "{msg}");
        assert!(msg.contains("deps/libfoo-1.2.json") && msg.contains("app.json"), "{msg}");
    }

    #[test]
    fn crypto_errors_map_to_kinds() {
        let unsupported: ValidationError = CryptoError::UnsupportedAlgorithm("MD6".into()).into();
        assert_eq!(unsupported.kind(), "UnsupportedAlgorithm");

        let io: ValidationError = CryptoError::Io {
            path: PathBuf::from("x.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
        .into();
        match io {
            ValidationError::FileAccess { path, reason } => {
                assert_eq!(path, PathBuf::from("x.json"));
                assert!(reason.contains("gone"));
            }
            other => panic!("expected FileAccess, got {other}"),
        }
    }

    #[test]
    fn schema_failure_gets_document_path() {
        let err = ValidationError::from_schema(
            SchemaError::ValidationFailed {
                violations: ValidationViolations::single("\"name\" is a required property"),
            },
            Path::new("deps/libfoo-1.2.json"),
        );
        match &err {
            ValidationError::SchemaViolation { path, violations } => {
                assert_eq!(path, Path::new("deps/libfoo-1.2.json"));
                assert_eq!(violations.len(), 1);
            }
            other => panic!("expected SchemaViolation, got {other}"),
        }
        assert!(err.to_string().contains("deps/libfoo-1.2.json"));
    }
}
