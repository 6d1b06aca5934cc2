//! # Schema Checking
//!
//! Structural validation of SPDX documents against JSON Schema (draft-07,
//! the dialect the SPDX 2.2 schema is written in).
//!
//! ## Security Invariant
//!
//! Schema checking is a trust boundary. Documents that fail are rejected
//! with structured violations: the instance path, the schema path, and the
//! validator's message. The orchestrator never reads relationships of a
//! document that has not passed.
//!
//! ## Violation policy
//!
//! [`ViolationPolicy::All`] reports every violation (the default);
//! [`ViolationPolicy::First`] stops at the first one. Pass/fail is the same
//! under both.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spdxv_core::SpdxVersion;

use crate::error::SchemaError;

/// The SPDX 2.2 JSON Schema shipped with the validator.
pub const BUILTIN_SPDX_2_2_SCHEMA: &str = include_str!("../schemas/spdx-schema-2.2.json");

/// How many violations a failed check reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationPolicy {
    /// Collect every violation.
    #[default]
    All,
    /// Stop at the first violation.
    First,
}

/// Where a compiled schema came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Shipped with the validator for this SPDX version.
    Builtin(SpdxVersion),
    /// Loaded from a file.
    File(PathBuf),
    /// Provided as an in-memory value.
    Inline,
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(v) => write!(f, "built-in SPDX {v}"),
            Self::File(p) => write!(f, "'{}'", p.display()),
            Self::Inline => f.write_str("inline"),
        }
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// A single violation at the document root.
    pub fn single(message: impl Into<String>) -> Self {
        Self::new(vec![Violation {
            instance_path: String::new(),
            schema_path: String::new(),
            message: message.into(),
        }])
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled JSON Schema plus the policy for reporting violations.
///
/// Compilation happens once at construction; `check` is cheap and the
/// checker is `Send + Sync`.
pub struct SchemaChecker {
    validator: Validator,
    source: SchemaSource,
    policy: ViolationPolicy,
}

impl fmt::Debug for SchemaChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaChecker")
            .field("source", &self.source)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SchemaChecker {
    /// Compile the schema shipped for `version`.
    pub fn builtin(version: SpdxVersion) -> Result<Self, SchemaError> {
        let text = match version {
            SpdxVersion::V2_2 => BUILTIN_SPDX_2_2_SCHEMA,
        };
        let schema: Value =
            serde_json::from_str(text).map_err(|e| SchemaError::ValidatorBuild {
                schema: SchemaSource::Builtin(version).to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::compile(&schema, SchemaSource::Builtin(version))
    }

    /// Load and compile a schema file.
    ///
    /// # Errors
    ///
    /// `SchemaError::SchemaLoad` if the file cannot be read or is not JSON,
    /// `SchemaError::ValidatorBuild` if it is not a valid JSON Schema.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::SchemaLoad {
            path: path.to_path_buf(),
            reason: format!("cannot read schema file: {e}"),
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Self::compile(&schema, SchemaSource::File(path.to_path_buf()))
    }

    /// Compile an in-memory schema.
    pub fn from_value(schema: &Value) -> Result<Self, SchemaError> {
        Self::compile(schema, SchemaSource::Inline)
    }

    fn compile(schema: &Value, source: SchemaSource) -> Result<Self, SchemaError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        let validator = opts.build(schema).map_err(|e| SchemaError::ValidatorBuild {
            schema: source.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(schema = %source, "compiled schema");
        Ok(Self {
            validator,
            source,
            policy: ViolationPolicy::default(),
        })
    }

    /// Set the violation reporting policy.
    pub fn with_policy(mut self, policy: ViolationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ViolationPolicy {
        self.policy
    }

    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    /// Check `instance` against the schema.
    ///
    /// # Errors
    ///
    /// `SchemaError::ValidationFailed` carrying one violation under
    /// [`ViolationPolicy::First`], or all of them under
    /// [`ViolationPolicy::All`].
    pub fn check(&self, instance: &Value) -> Result<(), SchemaError> {
        let limit = match self.policy {
            ViolationPolicy::All => usize::MAX,
            ViolationPolicy::First => 1,
        };

        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .take(limit)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                violations: ValidationViolations::new(violations),
            })
        }
    }
}
