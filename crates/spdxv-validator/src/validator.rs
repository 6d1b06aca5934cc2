//! # SPDX Validator
//!
//! Long-lived, immutable validation context: the compiled schema, the
//! manifest resolver and the checksum provider. Built once from a
//! [`ValidatorConfig`]; every request runs in its own
//! [`ValidationSession`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use spdxv_core::SpdxVersion;
use spdxv_crypto::{ChecksumProvider, FileDigester};
use spdxv_schema::{load_document, SchemaChecker, SchemaError};

use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use crate::manifest::Manifest;
use crate::resolver::ManifestResolver;
use crate::session::ValidationSession;

/// Validates SPDX manifests and the documents they link to.
pub struct SpdxValidator {
    version: SpdxVersion,
    checker: SchemaChecker,
    resolver: ManifestResolver,
    digester: Arc<dyn ChecksumProvider>,
    debug: bool,
}

impl fmt::Debug for SpdxValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpdxValidator")
            .field("version", &self.version)
            .field("checker", &self.checker)
            .field("resolver", &self.resolver)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl SpdxValidator {
    /// Build a validator: check the SPDX version, then load and compile
    /// the schema.
    ///
    /// # Errors
    ///
    /// `UnsupportedSpdxVersion` for anything but 2.2, `SchemaLoad` if the
    /// configured schema file is unreadable or not a JSON Schema.
    pub fn new(config: &ValidatorConfig) -> Result<Self, ValidationError> {
        let version: SpdxVersion = config.spdx_version.parse()?;

        let checker = match &config.schema_file {
            Some(path) => SchemaChecker::from_file(path)
                .map_err(|e| ValidationError::from_schema(e, path))?,
            None => SchemaChecker::builtin(version)
                .map_err(|e| ValidationError::from_schema(e, Path::new("")))?,
        }
        .with_policy(config.violation_policy);

        let resolver = ManifestResolver::new(config.search_dirs());
        tracing::debug!(
            spdx_version = %version,
            schema = %checker.source(),
            search_dirs = ?resolver.search_dirs(),
            "validator ready"
        );

        Ok(Self {
            version,
            checker,
            resolver,
            digester: Arc::new(FileDigester),
            debug: config.debug,
        })
    }

    /// Replace the checksum provider.
    pub fn with_checksum_provider(mut self, provider: Arc<dyn ChecksumProvider>) -> Self {
        self.digester = provider;
        self
    }

    pub fn version(&self) -> SpdxVersion {
        self.version
    }

    pub fn resolver(&self) -> &ManifestResolver {
        &self.resolver
    }

    pub fn checker(&self) -> &SchemaChecker {
        &self.checker
    }

    pub fn digester(&self) -> &dyn ChecksumProvider {
        self.digester.as_ref()
    }

    /// Start a fresh validation session.
    pub fn session(&self) -> ValidationSession<'_> {
        ValidationSession::new(self)
    }

    /// Validate one file in a new session and return its manifest.
    pub fn validate_file(&self, path: &Path, recursive: bool) -> Result<Manifest, ValidationError> {
        self.session().validate_file(path, recursive)
    }

    /// Load and schema-check a single manifest without following any of
    /// its links.
    pub fn load_manifest(&self, path: &Path) -> Result<Manifest, ValidationError> {
        let manifest = self.read_manifest(path)?;
        self.check_manifest(&manifest)?;
        Ok(manifest)
    }

    /// Read and parse a manifest. No schema check.
    pub fn read_manifest(&self, path: &Path) -> Result<Manifest, ValidationError> {
        tracing::debug!(file = %path.display(), "loading manifest");
        let raw = load_document(path).map_err(|err| self.rejected(err, path))?;
        Ok(Manifest::new(path.to_path_buf(), raw))
    }

    /// Check a loaded manifest against the configured schema.
    pub fn check_manifest(&self, manifest: &Manifest) -> Result<(), ValidationError> {
        self.checker
            .check(manifest.raw())
            .map_err(|err| self.rejected(err, manifest.path()))
    }

    fn rejected(&self, err: SchemaError, path: &Path) -> ValidationError {
        if self.debug {
            tracing::error!(file = %path.display(), cause = %err, "manifest rejected");
        }
        ValidationError::from_schema(err, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_builds() {
        let validator = SpdxValidator::new(&ValidatorConfig::default()).unwrap();
        assert_eq!(validator.version(), SpdxVersion::V2_2);
        assert_eq!(validator.resolver().search_dirs(), &[PathBuf::from(".")]);
    }

    #[test]
    fn unsupported_version_rejected() {
        let config = ValidatorConfig {
            spdx_version: "2.3".to_string(),
            ..Default::default()
        };
        let err = SpdxValidator::new(&config).unwrap_err();
        assert_eq!(err.kind(), "UnsupportedSpdxVersion");
        assert_eq!(err.to_string(), "unsupported SPDX version (2.3)");
    }

    #[test]
    fn missing_schema_file_is_schema_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = ValidatorConfig {
            schema_file: Some(dir.path().join("nope.json")),
            ..Default::default()
        };
        let err = SpdxValidator::new(&config).unwrap_err();
        assert_eq!(err.kind(), "SchemaLoad");
    }

    #[test]
    fn non_schema_file_is_schema_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"type": 12}"#).unwrap();
        let config = ValidatorConfig {
            schema_file: Some(path),
            ..Default::default()
        };
        let err = SpdxValidator::new(&config).unwrap_err();
        assert_eq!(err.kind(), "SchemaLoad");
    }

    #[test]
    fn policy_reaches_checker() {
        let config = ValidatorConfig {
            violation_policy: spdxv_schema::ViolationPolicy::First,
            ..Default::default()
        };
        let validator = SpdxValidator::new(&config).unwrap();
        assert_eq!(validator.checker().policy(), spdxv_schema::ViolationPolicy::First);
    }
}
